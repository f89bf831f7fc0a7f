//! Pedal dispenser firmware library.
//!
//! Exposes the control logic, ports and drivers for integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module, with a simulated counterpart for host builds.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod pins;

pub mod adapters;
pub mod drivers;
