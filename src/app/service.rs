//! Control service, the hexagonal core.
//!
//! [`ControlService`] owns the [`Controller`] and runs one tick per timer
//! event.  All I/O flows through port traits injected at call sites, so
//! the same code drives real pins on the board and mocks on the host.
//!
//! ```text
//!   WatchdogPort ◀── feed (first, every tick)
//!                 ┌────────────────────────┐
//!   DialPort  ──▶ │     ControlService     │ ──▶ ActuatorPort
//!   PedalPort ──▶ │  sampler · debounce ·  │ ──▶ EventSink
//!                 │  valve · timeout · pump│
//!                 └────────────────────────┘
//! ```

use log::info;

use crate::config::ControlConfig;
use crate::control::sampler;
use crate::control::{Controller, Outputs};
use crate::drivers::hw_timer::TickHandler;

use super::events::ControlEvent;
use super::ports::{ActuatorPort, DialPort, EventSink, PedalPort, WatchdogPort};

// ───────────────────────────────────────────────────────────────
// ControlService
// ───────────────────────────────────────────────────────────────

/// Runs the control core against the hardware ports.
pub struct ControlService {
    controller: Controller,
    io_faults: u32,
}

impl ControlService {
    /// Bring the dispenser to its startup state.
    ///
    /// Outputs are de-energised, the pedal level is latched as the
    /// committed state, and the first dial conversion is started.
    pub fn start(
        config: ControlConfig,
        hw: &mut (impl PedalPort + DialPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Self {
        hw.all_off();
        let pedal = hw.pedal_pressed();
        hw.start_conversion();

        sink.emit(&ControlEvent::Started { pedal });
        info!(
            "ControlService started (pedal={}, tick={}us, debounce={} ticks)",
            if pedal { "pressed" } else { "released" },
            config.tick_period_us,
            config.debounce_ticks,
        );

        Self {
            controller: Controller::new(config, pedal),
            io_faults: io_faults(&*hw),
        }
    }

    /// Reinitialise everything, as a hardware reset would.
    pub fn restart(
        &mut self,
        hw: &mut (impl PedalPort + DialPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        let config = *self.controller.config();
        *self = Self::start(config, hw, sink);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one tick: watchdog → dial → pedal → control step → outputs → events.
    ///
    /// Nothing here logs; anything worth reporting leaves as a [`ControlEvent`].
    pub fn tick(
        &mut self,
        hw: &mut (impl PedalPort + DialPort + ActuatorPort),
        wdt: &mut impl WatchdogPort,
        sink: &mut impl EventSink,
    ) -> Outputs {
        // 1. Heartbeat before anything else.
        wdt.feed();

        // 2. Inputs
        let conversion = sampler::collect(hw);
        let pedal = hw.pedal_pressed();

        // 3. Control step
        let prev = self.controller.outputs();
        let prev_mode = self.controller.mode();
        let out = self.controller.step(pedal, conversion);

        // 4. Outputs are rewritten every tick.
        hw.set_valve(out.valve);
        hw.set_pump(out.pump);

        // 5. Events
        let tick = self.controller.ticks();
        if out.valve != prev.valve {
            sink.emit(&ControlEvent::ValveChanged {
                open: out.valve,
                tick,
            });
        }
        if out.pump != prev.pump {
            sink.emit(&ControlEvent::PumpChanged { on: out.pump, tick });
        }
        let setting = self.controller.setting();
        if setting.mode != prev_mode {
            sink.emit(&ControlEvent::ModeChanged {
                from: prev_mode,
                to: setting.mode,
                timeout_ticks: setting.timeout_ticks,
            });
        }

        let faults = io_faults(&*hw);
        if faults != self.io_faults {
            self.io_faults = faults;
            sink.emit(&ControlEvent::IoFault { total: faults, tick });
        }

        let interval = u64::from(self.controller.config().telemetry_interval_ticks);
        if interval != 0 && tick % interval == 0 {
            sink.emit(&ControlEvent::Telemetry {
                snapshot: self.controller.snapshot(),
                dropped: sink.dropped(),
            });
        }

        out
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn outputs(&self) -> Outputs {
        self.controller.outputs()
    }
}

fn io_faults(hw: &(impl PedalPort + ActuatorPort)) -> u32 {
    hw.read_faults().saturating_add(hw.write_faults())
}

// ───────────────────────────────────────────────────────────────
// ControlLoop: everything the tick context owns
// ───────────────────────────────────────────────────────────────

/// Bundles the service with the ports it drives so the whole tick can be
/// handed to the timer as one exclusively owned value.
pub struct ControlLoop<H, W, S> {
    pub service: ControlService,
    pub hw: H,
    pub watchdog: W,
    pub sink: S,
}

impl<H, W, S> ControlLoop<H, W, S>
where
    H: PedalPort + DialPort + ActuatorPort,
    W: WatchdogPort,
    S: EventSink,
{
    /// Start the service on `hw` and take ownership of all ports.
    pub fn new(config: ControlConfig, mut hw: H, watchdog: W, mut sink: S) -> Self {
        let service = ControlService::start(config, &mut hw, &mut sink);
        Self {
            service,
            hw,
            watchdog,
            sink,
        }
    }

    pub fn tick(&mut self) -> Outputs {
        self.service
            .tick(&mut self.hw, &mut self.watchdog, &mut self.sink)
    }
}

impl<H, W, S> TickHandler for ControlLoop<H, W, S>
where
    H: PedalPort + DialPort + ActuatorPort,
    W: WatchdogPort,
    S: EventSink,
{
    fn on_tick(&mut self) {
        self.tick();
    }
}
