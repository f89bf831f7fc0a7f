//! Control-loop configuration.
//!
//! The dispenser has no storage and no protocol, so every parameter is a
//! compile-time design constant.  [`ControlConfig`] bundles them into one
//! value handed to the controller at startup; its [`Default`] is built
//! from the constants below and nothing changes it afterwards.

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Design constants
// ---------------------------------------------------------------------------

/// Ticks during which further pedal changes are ignored after a committed change.
pub const DEBOUNCE_TICKS: u32 = 10;

/// Highest dial reading that still selects Direct mode.
pub const PUMP_DIR_THR: u16 = 33;

/// Lowest dial reading that selects Permanent mode.
pub const PUMP_PERM_THR: u16 = 0x3F0;

/// Grace-period ticks per dial count in Timeout mode.
pub const PUMP_SCALE: u32 = 6;

/// Width of a dial reading (right-justified).
pub const DIAL_ADC_BITS: u8 = 10;

/// Tick period in microseconds (≈122 Hz).
pub const TICK_PERIOD_US: u32 = 8_192;

/// Watchdog period.  The tick must feed it at least this often.
pub const WATCHDOG_TIMEOUT_MS: u32 = 512;

/// Ticks between telemetry snapshots (≈10 s).  Zero disables telemetry.
pub const TELEMETRY_INTERVAL_TICKS: u32 = 1_220;

// ---------------------------------------------------------------------------
// ControlConfig
// ---------------------------------------------------------------------------

/// Parameters of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlConfig {
    // --- Pedal ---
    /// Debounce hold-off window (ticks).
    pub debounce_ticks: u32,

    // --- Dial classification ---
    /// Readings at or below this select Direct mode.
    pub direct_threshold: u16,
    /// Readings at or above this select Permanent mode.
    pub permanent_threshold: u16,
    /// Timeout duration = reading × scale (ticks).
    pub timeout_scale: u32,
    /// Dial ADC resolution (bits).
    pub adc_bits: u8,

    // --- Timing ---
    /// Tick period (microseconds).
    pub tick_period_us: u32,
    /// Watchdog period (milliseconds).
    pub watchdog_timeout_ms: u32,
    /// Telemetry interval (ticks, 0 = off).
    pub telemetry_interval_ticks: u32,
}

impl ControlConfig {
    /// The shipped configuration, usable in `const` context.
    pub const fn new() -> Self {
        Self {
            debounce_ticks: DEBOUNCE_TICKS,
            direct_threshold: PUMP_DIR_THR,
            permanent_threshold: PUMP_PERM_THR,
            timeout_scale: PUMP_SCALE,
            adc_bits: DIAL_ADC_BITS,
            tick_period_us: TICK_PERIOD_US,
            watchdog_timeout_ms: WATCHDOG_TIMEOUT_MS,
            telemetry_interval_ticks: TELEMETRY_INTERVAL_TICKS,
        }
    }

    /// Largest value the dial ADC can report.
    pub const fn adc_full_scale(&self) -> u16 {
        ((1u32 << self.adc_bits) - 1) as u16
    }

    /// Nominal tick frequency in hertz (rounded down).
    pub const fn tick_hz(&self) -> u32 {
        1_000_000 / self.tick_period_us
    }

    /// Check the parameters for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adc_bits == 0 || self.adc_bits > 16 {
            return Err(ConfigError::AdcResolution(self.adc_bits));
        }
        if self.direct_threshold >= self.permanent_threshold {
            return Err(ConfigError::ThresholdOrder);
        }
        if self.permanent_threshold > self.adc_full_scale() {
            return Err(ConfigError::ThresholdAboveFullScale);
        }
        if self.timeout_scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        // The longest Timeout-mode reading is one below the permanent threshold.
        let longest = u32::from(self.permanent_threshold - 1);
        if longest.checked_mul(self.timeout_scale).is_none() {
            return Err(ConfigError::TimeoutOverflow);
        }
        if self.tick_period_us == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if u64::from(self.watchdog_timeout_ms) * 1_000 < 2 * u64::from(self.tick_period_us) {
            return Err(ConfigError::WatchdogTooShort);
        }
        Ok(())
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a [`ControlConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// ADC width outside 1..=16 bits.
    AdcResolution(u8),
    /// Direct threshold must be strictly below the permanent threshold.
    ThresholdOrder,
    /// Permanent threshold cannot be reached by the ADC.
    ThresholdAboveFullScale,
    /// A zero scale would make every Timeout duration zero.
    ZeroScale,
    /// reading × scale does not fit the counter.
    TimeoutOverflow,
    ZeroTickPeriod,
    /// The watchdog would fire between two ticks.
    WatchdogTooShort,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcResolution(bits) => write!(f, "unsupported ADC resolution ({bits} bits)"),
            Self::ThresholdOrder => write!(f, "direct threshold not below permanent threshold"),
            Self::ThresholdAboveFullScale => write!(f, "permanent threshold above ADC full scale"),
            Self::ZeroScale => write!(f, "timeout scale is zero"),
            Self::TimeoutOverflow => write!(f, "timeout duration overflows the counter"),
            Self::ZeroTickPeriod => write!(f, "tick period is zero"),
            Self::WatchdogTooShort => write!(f, "watchdog period shorter than two ticks"),
        }
    }
}

impl std::error::Error for ConfigError {}
