//! Fuzz target: `Controller::step` over arbitrary pedal/dial streams
//!
//! The first bytes pick a configuration (skipped if it fails validation);
//! every following 3-byte chunk is one tick: a flags byte (bit 0 = pedal,
//! bit 1 = a conversion finished) and a little-endian reading.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Remaining grace ticks never exceed the current duration
//! - Valve always equals the committed pedal state
//! - Pump on whenever the valve is open or the mode is Permanent
//! - Committed pedal state never changes while the hold-off is running
//!
//! cargo fuzz run fuzz_control_tick

#![no_main]

use libfuzzer_sys::fuzz_target;
use pedal_dispenser::config::ControlConfig;
use pedal_dispenser::control::Controller;
use pedal_dispenser::control::sampler::PumpMode;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let (head, ticks) = data.split_at(4);

    let config = ControlConfig {
        debounce_ticks: u32::from(head[0] % 32),
        direct_threshold: u16::from(head[1]),
        permanent_threshold: 0x300 | u16::from(head[2]),
        timeout_scale: u32::from(head[3] % 16),
        ..ControlConfig::default()
    };
    if config.validate().is_err() {
        return;
    }

    let full_scale = config.adc_full_scale();
    let mut ctl = Controller::new(config, head[0] & 0x80 != 0);

    for chunk in ticks.chunks_exact(3) {
        let flags = chunk[0];
        let reading = u16::from_le_bytes([chunk[1], chunk[2]]) & full_scale;
        let conversion = (flags & 0b10 != 0).then_some(reading);

        let was_holding = ctl.debounce_hold() > 0;
        let before = ctl.pedal_committed();

        let out = ctl.step(flags & 1 != 0, conversion);
        let setting = ctl.setting();

        assert!(ctl.remaining_ticks() <= setting.timeout_ticks);
        assert_eq!(out.valve, ctl.pedal_committed());
        if out.valve || setting.mode == PumpMode::Permanent {
            assert!(out.pump);
        }
        if setting.mode == PumpMode::Direct {
            assert_eq!(out.pump, out.valve);
        }
        if was_holding {
            assert_eq!(ctl.pedal_committed(), before);
        }
    }
});
