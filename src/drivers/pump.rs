//! Pump motor driver (low-side MOSFET, on/off).
//!
//! ## Dual-target design
//!
//! Generic over an `embedded-hal` output pin: a [`GpioPin`](super::hw_init::GpioPin)
//! on the board, a simulated or mock pin on the host.  The driver is a
//! dumb actuator; when to run is decided by the control core.

use embedded_hal::digital::OutputPin;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Stopped,
    Running,
}

pub struct PumpMotor<P> {
    pin: P,
    state: PumpState,
    faults: u32,
}

impl<P: OutputPin> PumpMotor<P> {
    /// Takes the pin and drives it low.  Runs at startup, outside the
    /// tick, so a failure is logged directly.
    pub fn new(mut pin: P) -> Self {
        if let Err(e) = pin.set_low() {
            warn!("pump: initial set_low failed ({:?})", e);
        }
        Self {
            pin,
            state: PumpState::Stopped,
            faults: 0,
        }
    }

    pub fn set(&mut self, on: bool) {
        let result = if on { self.pin.set_high() } else { self.pin.set_low() };
        match result {
            Ok(()) => {
                self.state = if on { PumpState::Running } else { PumpState::Stopped };
            }
            // Counted, not logged: this runs in the tick context.
            Err(_) => self.faults = self.faults.saturating_add(1),
        }
    }

    pub fn stop(&mut self) {
        self.set(false);
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PumpState::Running
    }

    /// Failed writes so far.
    pub fn faults(&self) -> u32 {
        self.faults
    }
}
