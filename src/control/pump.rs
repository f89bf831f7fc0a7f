//! Pump grace-period counter and pump decision.

use super::sampler::PumpMode;

/// Saturating countdown that keeps the pump running after the valve closes.
///
/// Invariant: after [`PumpTimeout::clamp_and_decay`] the remaining count
/// never exceeds the duration it was clamped to.
#[derive(Debug, Clone, Default)]
pub struct PumpTimeout {
    remaining: u32,
}

impl PumpTimeout {
    pub fn new() -> Self {
        Self { remaining: 0 }
    }

    /// Restart the countdown at `duration` ticks.
    pub fn rearm(&mut self, duration: u32) {
        self.remaining = duration;
    }

    /// Clamp to `duration`, then count down one tick.
    ///
    /// Clamping first means a dial turned down mid-run shortens the grace
    /// period in the same tick it is observed.
    pub fn clamp_and_decay(&mut self, duration: u32) {
        if self.remaining > duration {
            self.remaining = duration;
        }
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.remaining != 0
    }
}

/// Pump output for one tick.  First match wins:
///
/// 1. valve open → on
/// 2. Permanent mode → on
/// 3. Timeout mode with time left → on
/// 4. otherwise off
pub fn decide(valve_open: bool, mode: PumpMode, remaining: u32) -> bool {
    if valve_open {
        return true;
    }
    match mode {
        PumpMode::Permanent => true,
        PumpMode::Timeout => remaining != 0,
        PumpMode::Direct => false,
    }
}
