//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured control events to the
//! logger (UART / USB-CDC in production).  Runs in the background loop,
//! never in the tick context.

use log::{info, warn};

use crate::app::events::ControlEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControlEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControlEvent) {
        match event {
            ControlEvent::Started { pedal } => {
                info!("START | pedal={}", if *pedal { "pressed" } else { "released" });
            }
            ControlEvent::ValveChanged { open, tick } => {
                info!("VALVE | {} @ tick {}", if *open { "OPEN" } else { "CLOSED" }, tick);
            }
            ControlEvent::PumpChanged { on, tick } => {
                info!("PUMP  | {} @ tick {}", if *on { "ON" } else { "OFF" }, tick);
            }
            ControlEvent::ModeChanged {
                from,
                to,
                timeout_ticks,
            } => {
                info!("MODE  | {:?} -> {:?} (grace={} ticks)", from, to, timeout_ticks);
            }
            ControlEvent::IoFault { total, tick } => {
                warn!("IO    | pin read/write failed @ tick {} ({} total)", tick, total);
            }
            ControlEvent::Telemetry { snapshot, dropped } => {
                match serde_json::to_string(snapshot) {
                    Ok(json) => info!("TELEM | {}", json),
                    Err(e) => warn!("TELEM | encode failed: {}", e),
                }
                if *dropped > 0 {
                    warn!("TELEM | {} events dropped (queue full)", dropped);
                }
            }
        }
    }
}
