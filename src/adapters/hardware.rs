//! Hardware adapter: bridges the pin and ADC drivers to the port traits.
//!
//! Owns the pedal switch, dial ADC, valve and pump drivers and exposes
//! them through [`PedalPort`], [`DialPort`] and [`ActuatorPort`].  The pin
//! types are generic over `embedded-hal` traits; on the board they are
//! [`GpioPin`](crate::drivers::hw_init::GpioPin)s, in tests anything that
//! implements the traits.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{ActuatorPort, DialPort, PedalPort};
use crate::drivers::dial::DialAdc;
use crate::drivers::pedal::PedalSwitch;
use crate::drivers::pump::PumpMotor;
use crate::drivers::valve::SolenoidValve;

/// Concrete adapter that combines all dispenser I/O behind port traits.
pub struct HardwareAdapter<P, V, M> {
    pedal: PedalSwitch<P>,
    dial: DialAdc,
    valve: SolenoidValve<V>,
    pump: PumpMotor<M>,
}

impl<P, V, M> HardwareAdapter<P, V, M>
where
    P: InputPin,
    V: OutputPin,
    M: OutputPin,
{
    pub fn new(
        pedal: PedalSwitch<P>,
        dial: DialAdc,
        valve: SolenoidValve<V>,
        pump: PumpMotor<M>,
    ) -> Self {
        Self {
            pedal,
            dial,
            valve,
            pump,
        }
    }

    pub fn valve(&self) -> &SolenoidValve<V> {
        &self.valve
    }

    pub fn pump(&self) -> &PumpMotor<M> {
        &self.pump
    }
}

// ── Input ports ───────────────────────────────────────────────

impl<P: InputPin, V, M> PedalPort for HardwareAdapter<P, V, M> {
    fn pedal_pressed(&mut self) -> bool {
        self.pedal.is_pressed()
    }

    fn read_faults(&self) -> u32 {
        self.pedal.faults()
    }
}

impl<P, V, M> DialPort for HardwareAdapter<P, V, M> {
    fn start_conversion(&mut self) {
        self.dial.start();
    }

    fn poll_conversion(&mut self) -> Option<u16> {
        self.dial.poll()
    }
}

// ── Output port ───────────────────────────────────────────────

impl<P, V: OutputPin, M: OutputPin> ActuatorPort for HardwareAdapter<P, V, M> {
    fn set_valve(&mut self, open: bool) {
        self.valve.set(open);
    }

    fn set_pump(&mut self, on: bool) {
        self.pump.set(on);
    }

    fn all_off(&mut self) {
        self.valve.close();
        self.pump.stop();
    }

    fn write_faults(&self) -> u32 {
        self.valve.faults().saturating_add(self.pump.faults())
    }
}
