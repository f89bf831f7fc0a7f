//! Solenoid valve driver (normally closed, energise to open).
//!
//! Drive errors inside the tick are counted, not logged; the control
//! service reports the count as an event.

use embedded_hal::digital::OutputPin;
use log::warn;

pub struct SolenoidValve<P> {
    pin: P,
    open: bool,
    faults: u32,
}

impl<P: OutputPin> SolenoidValve<P> {
    /// Takes the pin and drives it low (valve closed).  Runs at startup,
    /// outside the tick, so a failure is logged directly.
    pub fn new(mut pin: P) -> Self {
        if let Err(e) = pin.set_low() {
            warn!("valve: initial set_low failed ({:?})", e);
        }
        Self {
            pin,
            open: false,
            faults: 0,
        }
    }

    /// A failed write keeps the previous state.
    pub fn set(&mut self, open: bool) {
        let result = if open { self.pin.set_high() } else { self.pin.set_low() };
        match result {
            Ok(()) => self.open = open,
            Err(_) => self.faults = self.faults.saturating_add(1),
        }
    }

    pub fn close(&mut self) {
        self.set(false);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Failed writes so far.
    pub fn faults(&self) -> u32 {
        self.faults
    }
}
