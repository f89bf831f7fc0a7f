//! Queue-backed event sink for the tick context.
//!
//! Implements [`EventSink`] by pushing into the static event channel
//! (see [`crate::events`]).  Never blocks; a full queue drops the event
//! and bumps a counter that the next telemetry snapshot reports.

use crate::app::events::ControlEvent;
use crate::app::ports::EventSink;
use crate::events::push_event;

#[derive(Debug, Default)]
pub struct QueueEventSink {
    dropped: u32,
}

impl QueueEventSink {
    pub fn new() -> Self {
        Self { dropped: 0 }
    }
}

impl EventSink for QueueEventSink {
    fn emit(&mut self, event: &ControlEvent) {
        if !push_event(*event) {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    fn dropped(&self) -> u32 {
        self.dropped
    }
}
