//! Pin, ADC, timer and watchdog drivers.

pub mod dial;
pub mod hw_init;
pub mod hw_timer;
pub mod pedal;
pub mod pump;
pub mod valve;
pub mod watchdog;
