//! Outbound control events.
//!
//! The [`ControlService`](super::service::ControlService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  All variants
//! are plain copies of state, so they can cross from the tick context to
//! the background loop without sharing anything.

use serde::Serialize;

use crate::control::ControlSnapshot;
use crate::control::sampler::PumpMode;

/// Structured events emitted by the control service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlEvent {
    /// The service (re)initialised; carries the pedal level latched at startup.
    Started { pedal: bool },

    /// The valve output changed.
    ValveChanged { open: bool, tick: u64 },

    /// The pump output changed.
    PumpChanged { on: bool, tick: u64 },

    /// The dial moved into a different pump mode.
    ModeChanged { from: PumpMode, to: PumpMode, timeout_ticks: u32 },

    /// Pedal reads or output writes failed since the last report;
    /// `total` is the running count.
    IoFault { total: u32, tick: u64 },

    /// Periodic state snapshot; `dropped` counts events lost to a full queue.
    Telemetry { snapshot: ControlSnapshot, dropped: u32 },
}
