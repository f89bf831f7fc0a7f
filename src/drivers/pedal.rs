//! Foot pedal switch.
//!
//! Reports the raw contact level only; debouncing belongs to the control
//! core so the hold-off window is counted in ticks.  Read errors are
//! counted rather than logged because reads happen in the tick context.

use embedded_hal::digital::InputPin;

pub struct PedalSwitch<P> {
    pin: P,
    active_high: bool,
    faults: u32,
}

impl<P: InputPin> PedalSwitch<P> {
    /// Pedal that pulls the line high when pressed.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_high: true,
            faults: 0,
        }
    }

    /// Pedal that pulls the line low when pressed.
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_high: false,
            faults: 0,
        }
    }

    /// Raw pressed state.  A failed read counts as released.
    pub fn is_pressed(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high == self.active_high,
            Err(_) => {
                self.faults = self.faults.saturating_add(1);
                false
            }
        }
    }

    /// Failed reads so far.
    pub fn faults(&self) -> u32 {
        self.faults
    }
}
