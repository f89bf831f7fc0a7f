//! Tick-context → background-loop event queue.
//!
//! The tick handler must never block, so it does not log.  It pushes
//! copies of [`ControlEvent`]s into a static bounded channel instead; the
//! background loop drains the channel and does the slow work.
//!
//! ```text
//! ┌──────────────┐  ControlEvent  ┌─────────────────┐
//! │ Tick context │───────────────▶│ Background loop │──▶ LogEventSink
//! │ (esp_timer)  │  try_send only │ (drain + log)   │
//! └──────────────┘                └─────────────────┘
//! ```
//!
//! Only copies travel through the channel; the control state itself stays
//! owned by the tick context.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::app::events::ControlEvent;

/// Maximum number of pending events.
pub const EVENT_QUEUE_DEPTH: usize = 32;

/// Outbound events: tick context → background loop.
pub static CONTROL_EVENTS: Channel<CriticalSectionRawMutex, ControlEvent, EVENT_QUEUE_DEPTH> =
    Channel::new();

/// Push an event without blocking.
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: ControlEvent) -> bool {
    CONTROL_EVENTS.try_send(event).is_ok()
}

/// Drain all pending events into a callback, in FIFO order.
pub fn drain_events(mut handler: impl FnMut(ControlEvent)) {
    while let Ok(event) = CONTROL_EVENTS.try_receive() {
        handler(event);
    }
}

/// Number of pending events.
pub fn queue_len() -> usize {
    CONTROL_EVENTS.len()
}
