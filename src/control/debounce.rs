//! Pedal debounce filter.
//!
//! A change on the raw input is committed immediately; the hold-off
//! window that follows blocks any *further* change:
//!
//! ```text
//!            change seen            window elapsed
//!   Idle ────────────────▶ Holding ───────────────▶ Idle
//!   (hold = 0)             (hold = N … 1)
//! ```
//!
//! While holding, raw flips are neither compared nor committed, so a
//! contact bounce inside the window never reaches the valve.

/// Hold-off debounce state for a single digital input.
#[derive(Debug, Clone)]
pub struct DebounceFilter {
    window: u32,
    hold: u32,
    committed: bool,
    raw: bool,
}

impl DebounceFilter {
    /// Create a filter whose committed state starts at `initial` (the
    /// level read from hardware at startup).
    pub fn new(window: u32, initial: bool) -> Self {
        Self {
            window,
            hold: 0,
            committed: initial,
            raw: initial,
        }
    }

    /// Feed one raw sample.  Returns the committed state after this tick.
    pub fn update(&mut self, raw: bool) -> bool {
        self.raw = raw;
        if self.hold == 0 {
            if raw != self.committed {
                self.hold = self.window;
            }
            self.committed = raw;
        } else {
            self.hold -= 1;
        }
        self.committed
    }

    /// Debounced (committed) pedal state.
    pub fn committed(&self) -> bool {
        self.committed
    }

    /// Most recent raw sample, committed or not.
    pub fn raw(&self) -> bool {
        self.raw
    }

    /// Remaining hold-off ticks; zero when idle.
    pub fn hold(&self) -> u32 {
        self.hold
    }

    pub fn is_holding(&self) -> bool {
        self.hold > 0
    }
}
