//! GPIO / peripheral pin assignments for the dispenser controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Foot pedal switch.  HIGH = pressed (external pull-down).
pub const PEDAL_GPIO: i32 = 4;

/// Flow-rate dial potentiometer wiper, ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const DIAL_ADC_GPIO: i32 = 5;
/// ADC1 channel number for [`DIAL_ADC_GPIO`].
pub const DIAL_ADC_CHANNEL: u32 = 4;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Solenoid valve driver (low-side MOSFET).  HIGH = valve open.
pub const VALVE_GPIO: i32 = 6;

/// Pump motor driver (low-side MOSFET).  HIGH = pump running.
pub const PUMP_GPIO: i32 = 7;

/// Native width of an ESP32-S3 ADC1 oneshot reading.
pub const ADC_NATIVE_BITS: u8 = 12;
