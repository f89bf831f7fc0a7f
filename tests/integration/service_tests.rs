//! Integration tests for the ControlService → ports pipeline: call order,
//! conversion handling, events and the tick handler wrapper.

use crate::mock_hw::{Call, MockHardware, MockWatchdog, RecordingSink, Rig};

use pedal_dispenser::adapters::queue_sink::QueueEventSink;
use pedal_dispenser::app::events::ControlEvent;
use pedal_dispenser::app::service::{ControlLoop, ControlService};
use pedal_dispenser::config::ControlConfig;
use pedal_dispenser::control::sampler::PumpMode;
use pedal_dispenser::drivers::hw_timer::TickHandler;
use pedal_dispenser::events::drain_events;

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_clears_outputs_then_latches_pedal_and_starts_conversion() {
    let rig = Rig::new(0);
    assert_eq!(
        rig.hw.calls(),
        vec![Call::AllOff, Call::ReadPedal, Call::StartConversion]
    );
    assert_eq!(rig.sink.events, vec![ControlEvent::Started { pedal: false }]);
}

#[test]
fn pedal_held_through_boot_is_committed_without_hold_off() {
    let mut hw = MockHardware::with_dial(20);
    hw.pedal = true;
    let mut sink = RecordingSink::new();
    let mut wdt = MockWatchdog::attached_to(&hw);
    let mut service = ControlService::start(ControlConfig::default(), &mut hw, &mut sink);
    assert_eq!(sink.events[0], ControlEvent::Started { pedal: true });

    let out = service.tick(&mut hw, &mut wdt, &mut sink);
    assert!(out.valve);
    assert_eq!(service.controller().debounce_hold(), 0);
}

// ── Tick ordering ─────────────────────────────────────────────

#[test]
fn watchdog_is_fed_first_every_tick() {
    let mut rig = Rig::new(300);
    rig.hw.clear_calls();
    rig.run(8);

    let calls = rig.hw.calls();
    let ticks: Vec<&[Call]> = calls
        .split_inclusive(|c| matches!(c, Call::SetPump(_)))
        .collect();
    assert_eq!(ticks.len(), 8);
    for tick in ticks {
        assert_eq!(tick[0], Call::Feed);
        assert_eq!(tick.iter().filter(|c| **c == Call::Feed).count(), 1);
    }
    assert_eq!(rig.wdt.feeds, 8);
}

#[test]
fn tick_reads_dial_before_pedal_and_writes_both_outputs() {
    let mut rig = Rig::new(300);
    rig.hw.clear_calls();
    rig.tick();
    assert_eq!(
        rig.hw.calls(),
        vec![
            Call::Feed,
            Call::PollConversion,
            Call::StartConversion,
            Call::ReadPedal,
            Call::SetValve(false),
            Call::SetPump(false),
        ]
    );
}

#[test]
fn outputs_are_rewritten_every_tick_even_when_unchanged() {
    let mut rig = Rig::new(20);
    rig.hw.clear_calls();
    rig.run(12);
    let calls = rig.hw.calls();
    let valve_writes = calls.iter().filter(|c| matches!(c, Call::SetValve(_))).count();
    let pump_writes = calls.iter().filter(|c| matches!(c, Call::SetPump(_))).count();
    assert_eq!(valve_writes, 12);
    assert_eq!(pump_writes, 12);
}

// ── Analog sampler ────────────────────────────────────────────

#[test]
fn busy_conversion_is_not_restarted() {
    let mut rig = Rig::new(PumpModeDial::TIMEOUT);
    // The boot conversion lands on tick 1 and a new one starts.
    rig.tick();
    assert_eq!(rig.service.controller().conversions(), 1);
    let started = rig.hw.conversions_started;
    rig.hw.latency = 3;

    rig.run(2);
    assert_eq!(rig.hw.conversions_started, started, "still busy");
    assert_eq!(rig.service.controller().conversions(), 1);

    rig.tick();
    assert_eq!(rig.hw.conversions_started, started + 1);
    assert_eq!(rig.service.controller().conversions(), 2);
}

#[test]
fn mode_is_direct_until_first_conversion_lands() {
    let mut rig = Rig::new(PumpModeDial::PERMANENT);
    rig.hw.latency = 4;
    rig.service.restart(&mut rig.hw, &mut rig.sink);

    for _ in 0..3 {
        let out = rig.tick();
        assert_eq!(rig.service.controller().mode(), PumpMode::Direct);
        assert!(!out.pump, "no pump before the dial has been read");
    }
    assert!(rig.tick().pump);
}

// ── Events ────────────────────────────────────────────────────

#[test]
fn mode_changes_are_reported_with_duration() {
    let mut rig = Rig::new(500);
    rig.tick();
    rig.hw.dial = 1_015;
    rig.tick();
    rig.tick();

    let modes: Vec<ControlEvent> = rig
        .sink
        .events
        .iter()
        .copied()
        .filter(|e| matches!(e, ControlEvent::ModeChanged { .. }))
        .collect();
    assert_eq!(
        modes,
        vec![
            ControlEvent::ModeChanged {
                from: PumpMode::Direct,
                to: PumpMode::Timeout,
                timeout_ticks: 3_000,
            },
            ControlEvent::ModeChanged {
                from: PumpMode::Timeout,
                to: PumpMode::Permanent,
                timeout_ticks: 0,
            },
        ]
    );
}

#[test]
fn telemetry_follows_interval_and_reports_drops() {
    let config = ControlConfig {
        telemetry_interval_ticks: 5,
        ..ControlConfig::default()
    };
    let mut rig = Rig::with_config(config, 300);
    rig.sink.dropped = 7;
    rig.run(12);

    let telemetry: Vec<(u64, u32)> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            ControlEvent::Telemetry { snapshot, dropped } => Some((snapshot.tick, *dropped)),
            _ => None,
        })
        .collect();
    assert_eq!(telemetry, vec![(5, 7), (10, 7)]);
}

#[test]
fn zero_telemetry_interval_disables_snapshots() {
    let config = ControlConfig {
        telemetry_interval_ticks: 0,
        ..ControlConfig::default()
    };
    let mut rig = Rig::with_config(config, 300);
    rig.run(50);
    assert!(
        !rig.sink
            .events
            .iter()
            .any(|e| matches!(e, ControlEvent::Telemetry { .. }))
    );
}

#[test]
fn pin_faults_are_reported_once_per_increase() {
    let mut rig = Rig::new(300);
    rig.hw.read_faults = 1; // a fault seen before start is not re-reported
    rig.service.restart(&mut rig.hw, &mut rig.sink);
    rig.run(3);

    rig.hw.read_faults = 2;
    rig.tick();
    rig.run(2);
    rig.hw.write_faults = 3;
    rig.tick();

    let faults: Vec<ControlEvent> = rig
        .sink
        .events
        .iter()
        .copied()
        .filter(|e| matches!(e, ControlEvent::IoFault { .. }))
        .collect();
    assert_eq!(
        faults,
        vec![
            ControlEvent::IoFault { total: 2, tick: 4 },
            ControlEvent::IoFault { total: 5, tick: 7 },
        ]
    );
}

// ── ControlLoop / queue ───────────────────────────────────────

#[test]
fn control_loop_ticks_through_handler_and_queue_reaches_drain() {
    drain_events(|_| {});

    let mut hw = MockHardware::with_dial(PumpModeDial::PERMANENT);
    hw.pedal = true;
    let wdt = MockWatchdog::attached_to(&hw);
    let mut lp = ControlLoop::new(ControlConfig::default(), hw, wdt, QueueEventSink::new());

    for _ in 0..3 {
        lp.on_tick();
    }
    assert_eq!(lp.watchdog.feeds, 3);
    assert_eq!(lp.service.controller().ticks(), 3);
    assert!(lp.hw.valve && lp.hw.pump);

    let mut seen = Vec::new();
    drain_events(|e| seen.push(e));
    assert_eq!(seen[0], ControlEvent::Started { pedal: true });
    assert!(seen.contains(&ControlEvent::ValveChanged { open: true, tick: 1 }));
    assert!(seen.contains(&ControlEvent::PumpChanged { on: true, tick: 1 }));
}

/// Dial readings that land in each band with the default thresholds.
struct PumpModeDial;

impl PumpModeDial {
    const TIMEOUT: u16 = 300;
    const PERMANENT: u16 = 1_020;
}
