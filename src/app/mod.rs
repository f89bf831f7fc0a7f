//! Application layer: orchestration of the control core, no direct I/O.
//!
//! The tick order and event reporting live here.  All interaction with
//! hardware happens through the **port traits** in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
