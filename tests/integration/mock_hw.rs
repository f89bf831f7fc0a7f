//! Mock hardware for integration tests.
//!
//! Every port call lands in a shared journal so tests can assert on the
//! exact order of watchdog, ADC, pedal and actuator traffic without real
//! GPIO or ADC registers.

use std::cell::RefCell;
use std::rc::Rc;

use pedal_dispenser::app::events::ControlEvent;
use pedal_dispenser::app::ports::{ActuatorPort, DialPort, EventSink, PedalPort, WatchdogPort};
use pedal_dispenser::app::service::ControlService;
use pedal_dispenser::config::ControlConfig;
use pedal_dispenser::control::Outputs;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Feed,
    StartConversion,
    PollConversion,
    ReadPedal,
    SetValve(bool),
    SetPump(bool),
    AllOff,
}

pub type Journal = Rc<RefCell<Vec<Call>>>;

// ── MockHardware ──────────────────────────────────────────────

/// Scripted pedal and dial, recorded valve and pump.
pub struct MockHardware {
    journal: Journal,
    /// Level returned by the next pedal read.
    pub pedal: bool,
    /// Value the next completed conversion returns (dial units).
    pub dial: u16,
    /// Polls a conversion needs before it completes.
    pub latency: u32,
    in_flight: bool,
    elapsed: u32,
    pub conversions_started: u32,
    pub valve: bool,
    pub pump: bool,
    /// Reported through the fault counters of the ports.
    pub read_faults: u32,
    pub write_faults: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            journal: Rc::new(RefCell::new(Vec::new())),
            pedal: false,
            dial: 0,
            latency: 1,
            in_flight: false,
            elapsed: 0,
            conversions_started: 0,
            valve: false,
            pump: false,
            read_faults: 0,
            write_faults: 0,
        }
    }

    pub fn with_dial(dial: u16) -> Self {
        Self {
            dial,
            ..Self::new()
        }
    }

    pub fn journal(&self) -> Journal {
        Rc::clone(&self.journal)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.journal.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.journal.borrow_mut().clear();
    }

    pub fn conversion_in_flight(&self) -> bool {
        self.in_flight
    }

    fn record(&self, call: Call) {
        self.journal.borrow_mut().push(call);
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl PedalPort for MockHardware {
    fn pedal_pressed(&mut self) -> bool {
        self.record(Call::ReadPedal);
        self.pedal
    }

    fn read_faults(&self) -> u32 {
        self.read_faults
    }
}

impl DialPort for MockHardware {
    fn start_conversion(&mut self) {
        self.record(Call::StartConversion);
        self.in_flight = true;
        self.elapsed = 0;
        self.conversions_started += 1;
    }

    fn poll_conversion(&mut self) -> Option<u16> {
        self.record(Call::PollConversion);
        if !self.in_flight {
            return None;
        }
        self.elapsed += 1;
        if self.elapsed < self.latency {
            return None;
        }
        self.in_flight = false;
        Some(self.dial)
    }
}

impl ActuatorPort for MockHardware {
    fn set_valve(&mut self, open: bool) {
        self.record(Call::SetValve(open));
        self.valve = open;
    }

    fn set_pump(&mut self, on: bool) {
        self.record(Call::SetPump(on));
        self.pump = on;
    }

    fn all_off(&mut self) {
        self.record(Call::AllOff);
        self.valve = false;
        self.pump = false;
    }

    fn write_faults(&self) -> u32 {
        self.write_faults
    }
}

// ── MockWatchdog ──────────────────────────────────────────────

/// Counts feeds and journals them alongside the hardware calls.
pub struct MockWatchdog {
    journal: Journal,
    pub feeds: u32,
}

impl MockWatchdog {
    pub fn attached_to(hw: &MockHardware) -> Self {
        Self {
            journal: hw.journal(),
            feeds: 0,
        }
    }
}

impl WatchdogPort for MockWatchdog {
    fn feed(&mut self) {
        self.journal.borrow_mut().push(Call::Feed);
        self.feeds += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Keeps every event; `dropped` is reported as-is in telemetry.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ControlEvent>,
    pub dropped: u32,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valve_changes(&self) -> Vec<(bool, u64)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControlEvent::ValveChanged { open, tick } => Some((*open, *tick)),
                _ => None,
            })
            .collect()
    }

    pub fn pump_changes(&self) -> Vec<(bool, u64)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControlEvent::PumpChanged { on, tick } => Some((*on, *tick)),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ControlEvent) {
        self.events.push(*event);
    }

    fn dropped(&self) -> u32 {
        self.dropped
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// A started service wired to mocks.
pub struct Rig {
    pub service: ControlService,
    pub hw: MockHardware,
    pub wdt: MockWatchdog,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new(dial: u16) -> Self {
        Self::with_config(ControlConfig::default(), dial)
    }

    pub fn with_config(config: ControlConfig, dial: u16) -> Self {
        let mut hw = MockHardware::with_dial(dial);
        let wdt = MockWatchdog::attached_to(&hw);
        let mut sink = RecordingSink::new();
        let service = ControlService::start(config, &mut hw, &mut sink);
        Self {
            service,
            hw,
            wdt,
            sink,
        }
    }

    pub fn tick(&mut self) -> Outputs {
        self.service.tick(&mut self.hw, &mut self.wdt, &mut self.sink)
    }

    pub fn run(&mut self, ticks: u32) -> Vec<Outputs> {
        (0..ticks).map(|_| self.tick()).collect()
    }
}
