//! Tick-driven valve/pump control core.
//!
//! [`Controller`] is the single owned context holding every piece of
//! control state.  One call to [`Controller::step`] is one tick:
//!
//! ```text
//!  dial reading ──▶ AnalogSampler ──┐ mode, duration
//!                                   ▼
//!  pedal level ──▶ DebounceFilter ──▶ valve ──▶ PumpTimeout ──▶ decide ──▶ pump
//!                                    (re-arm)   (clamp, decay)
//! ```
//!
//! The tick runs to completion and nothing else touches the context, so
//! there are no locks here.  Whoever owns the `Controller` (the timer
//! callback on hardware, the test harness on the host) is the only writer.

pub mod debounce;
pub mod pump;
pub mod sampler;

use serde::Serialize;

use crate::config::ControlConfig;

use debounce::DebounceFilter;
use pump::PumpTimeout;
use sampler::{AnalogSampler, DialSetting, PumpMode};

/// The two externally visible outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Outputs {
    pub valve: bool,
    pub pump: bool,
}

impl Outputs {
    /// Both actuators de-energised.
    pub const OFF: Self = Self {
        valve: false,
        pump: false,
    };
}

/// Point-in-time copy of the control state, for telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlSnapshot {
    pub tick: u64,
    pub mode: PumpMode,
    pub timeout_ticks: u32,
    pub remaining_ticks: u32,
    pub dial_reading: Option<u16>,
    pub pedal_raw: bool,
    pub pedal_committed: bool,
    pub debounce_hold: u32,
    pub valve: bool,
    pub pump: bool,
}

/// Owned control context.
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControlConfig,
    sampler: AnalogSampler,
    debounce: DebounceFilter,
    timeout: PumpTimeout,
    outputs: Outputs,
    ticks: u64,
}

impl Controller {
    /// Startup state: counter cleared, Direct mode until the first
    /// conversion, committed pedal state latched from `pedal_at_boot`,
    /// outputs off.
    pub fn new(config: ControlConfig, pedal_at_boot: bool) -> Self {
        Self {
            config,
            sampler: AnalogSampler::new(),
            debounce: DebounceFilter::new(config.debounce_ticks, pedal_at_boot),
            timeout: PumpTimeout::new(),
            outputs: Outputs::OFF,
            ticks: 0,
        }
    }

    /// Run one tick.
    ///
    /// `conversion` is the dial reading that finished since the previous
    /// tick, if any.
    pub fn step(&mut self, pedal_raw: bool, conversion: Option<u16>) -> Outputs {
        self.ticks = self.ticks.wrapping_add(1);

        // 1. Analog sampler
        if let Some(reading) = conversion {
            self.sampler.accept(reading, &self.config);
        }
        let DialSetting {
            mode,
            timeout_ticks,
        } = self.sampler.setting();

        // 2. Debounce filter
        let pedal = self.debounce.update(pedal_raw);

        // 3. Valve controller: re-arm every tick the pedal is held.
        let valve = pedal;
        if valve {
            self.timeout.rearm(timeout_ticks);
        }

        // 4. Pump timeout counter
        self.timeout.clamp_and_decay(timeout_ticks);

        // 5. Pump decision
        let pump = pump::decide(valve, mode, self.timeout.remaining());

        self.outputs = Outputs { valve, pump };
        self.outputs
    }

    /// Outputs computed by the most recent tick.
    pub fn outputs(&self) -> Outputs {
        self.outputs
    }

    pub fn setting(&self) -> DialSetting {
        self.sampler.setting()
    }

    pub fn mode(&self) -> PumpMode {
        self.sampler.mode()
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.timeout.remaining()
    }

    pub fn pedal_committed(&self) -> bool {
        self.debounce.committed()
    }

    pub fn debounce_hold(&self) -> u32 {
        self.debounce.hold()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn conversions(&self) -> u64 {
        self.sampler.conversions()
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            tick: self.ticks,
            mode: self.sampler.mode(),
            timeout_ticks: self.sampler.timeout_ticks(),
            remaining_ticks: self.timeout.remaining(),
            dial_reading: self.sampler.last_reading(),
            pedal_raw: self.debounce.raw(),
            pedal_committed: self.debounce.committed(),
            debounce_hold: self.debounce.hold(),
            valve: self.outputs.valve,
            pump: self.outputs.pump,
        }
    }
}
