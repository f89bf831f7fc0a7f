//! Dial sampler.
//!
//! Keeps exactly one ADC conversion in flight and turns each finished
//! reading into a [`DialSetting`]:
//!
//! ```text
//!   0 ─────── DIR_THR ──────────────────── PERM_THR ─────── full scale
//!   │ Direct  │        Timeout               │  Permanent       │
//!   │ dur = 0 │  dur = reading × scale       │  dur = 0         │
//! ```

use serde::Serialize;

use crate::app::ports::DialPort;
use crate::config::ControlConfig;

/// How the pump behaves while the valve is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PumpMode {
    /// Pump mirrors the valve, no grace period.
    #[default]
    Direct,
    /// Pump keeps running for a dial-derived grace period after the valve closes.
    Timeout,
    /// Pump runs regardless of the valve.
    Permanent,
}

/// Mode and grace-period duration, always updated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DialSetting {
    pub mode: PumpMode,
    /// Grace period in ticks; zero unless `mode` is [`PumpMode::Timeout`].
    pub timeout_ticks: u32,
}

/// Classify a raw dial reading.
pub fn classify(reading: u16, config: &ControlConfig) -> DialSetting {
    if reading >= config.permanent_threshold {
        DialSetting {
            mode: PumpMode::Permanent,
            timeout_ticks: 0,
        }
    } else if reading <= config.direct_threshold {
        DialSetting {
            mode: PumpMode::Direct,
            timeout_ticks: 0,
        }
    } else {
        DialSetting {
            mode: PumpMode::Timeout,
            // Saturates for configs that never went through validate().
            timeout_ticks: u32::from(reading).saturating_mul(config.timeout_scale),
        }
    }
}

/// Collect a finished conversion, if any, and immediately start the next one.
///
/// Called once per tick; the ADC is never idle for more than one tick.
pub fn collect(adc: &mut impl DialPort) -> Option<u16> {
    let reading = adc.poll_conversion()?;
    adc.start_conversion();
    Some(reading)
}

/// Latest dial classification.
///
/// Until the first conversion completes the setting is Direct with a zero
/// duration, so the pump can only run while the valve is open.
#[derive(Debug, Clone)]
pub struct AnalogSampler {
    setting: DialSetting,
    last_reading: Option<u16>,
    conversions: u64,
}

impl AnalogSampler {
    pub fn new() -> Self {
        Self {
            setting: DialSetting::default(),
            last_reading: None,
            conversions: 0,
        }
    }

    /// Classify a finished reading and make it the current setting.
    pub fn accept(&mut self, reading: u16, config: &ControlConfig) -> DialSetting {
        self.setting = classify(reading, config);
        self.last_reading = Some(reading);
        self.conversions = self.conversions.wrapping_add(1);
        self.setting
    }

    pub fn setting(&self) -> DialSetting {
        self.setting
    }

    pub fn mode(&self) -> PumpMode {
        self.setting.mode
    }

    pub fn timeout_ticks(&self) -> u32 {
        self.setting.timeout_ticks
    }

    /// Raw value of the most recent conversion.
    pub fn last_reading(&self) -> Option<u16> {
        self.last_reading
    }

    /// Number of completed conversions since startup.
    pub fn conversions(&self) -> u64 {
        self.conversions
    }
}

impl Default for AnalogSampler {
    fn default() -> Self {
        Self::new()
    }
}
