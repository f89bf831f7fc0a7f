//! Port traits: the hexagonal boundary between the control core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService (domain)
//! ```
//!
//! Hardware adapters implement these traits; [`ControlService`](super::service::ControlService)
//! consumes them via generics, so the control core never touches
//! registers directly.  None of the ports can fail: a digital read or an
//! analog conversion that cannot complete is a hardware fault, and the
//! watchdog is the recovery path.  Pin failures are only counted; the
//! service turns a growing count into an event.

use super::events::ControlEvent;

// ───────────────────────────────────────────────────────────────
// Input ports (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Digital pedal line.
pub trait PedalPort {
    /// Immediate (undebounced) pedal level; `true` = pressed.
    fn pedal_pressed(&mut self) -> bool;

    /// Failed pedal reads so far (each was reported as released).
    fn read_faults(&self) -> u32 {
        0
    }
}

/// Single-channel dial ADC with one conversion in flight.
pub trait DialPort {
    /// Start a new conversion.
    fn start_conversion(&mut self);

    /// Result of the in-flight conversion once it has finished, `None`
    /// while busy.  A result is returned once; the caller restarts the
    /// converter after collecting it.
    fn poll_conversion(&mut self) -> Option<u16>;
}

// ───────────────────────────────────────────────────────────────
// Output ports (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Valve and pump drive lines.
pub trait ActuatorPort {
    fn set_valve(&mut self, open: bool);

    fn set_pump(&mut self, on: bool);

    /// De-energise everything (valve closed, pump off).
    fn all_off(&mut self) {
        self.set_valve(false);
        self.set_pump(false);
    }

    /// Failed output writes so far.
    fn write_faults(&self) -> u32 {
        0
    }
}

/// Liveness heartbeat.
pub trait WatchdogPort {
    /// Acknowledge the watchdog.  Must run at least once per watchdog period.
    fn feed(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → observers)
// ───────────────────────────────────────────────────────────────

/// Receives structured events from the control service.
///
/// Implementations called from the tick context must not block.
pub trait EventSink {
    fn emit(&mut self, event: &ControlEvent);

    /// Events discarded so far because the sink was full.
    fn dropped(&self) -> u32 {
        0
    }
}
