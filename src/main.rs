//! Pedal Dispenser Firmware: Main Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                     │
//! │                                                             │
//! │  HardwareAdapter            Watchdog      QueueEventSink    │
//! │  (Pedal+Dial+Actuator)      (WatchdogPort) (EventSink)      │
//! │                                                             │
//! │  ──────────────── Port Trait Boundary ──────────────────    │
//! │                                                             │
//! │  ┌───────────────────────────────────────────────────┐      │
//! │  │        ControlService (pure logic, tick ctx)      │      │
//! │  │  sampler · debounce · valve · timeout · pump      │      │
//! │  └───────────────────────────────────────────────────┘      │
//! │                                                             │
//! │  esp_timer tick ──▶ ControlLoop  main task ──▶ LogEventSink │
//! └─────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;

use pedal_dispenser::adapters::hardware::HardwareAdapter;
use pedal_dispenser::adapters::log_sink::LogEventSink;
use pedal_dispenser::adapters::queue_sink::QueueEventSink;
use pedal_dispenser::app::ports::EventSink;
use pedal_dispenser::app::service::ControlLoop;
use pedal_dispenser::config::ControlConfig;
use pedal_dispenser::diagnostics;
use pedal_dispenser::drivers::dial::DialAdc;
use pedal_dispenser::drivers::hw_init::{self, GpioPin};
use pedal_dispenser::drivers::hw_timer;
use pedal_dispenser::drivers::pedal::PedalSwitch;
use pedal_dispenser::drivers::pump::PumpMotor;
use pedal_dispenser::drivers::valve::SolenoidValve;
use pedal_dispenser::drivers::watchdog::Watchdog;
use pedal_dispenser::events::drain_events;
use pedal_dispenser::pins;

/// How often the background loop drains the event queue.
const DRAIN_INTERVAL_MS: u32 = 20;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Pedal Dispenser v{}              ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    diagnostics::log_reset_reason();
    diagnostics::install_panic_handler();

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControlConfig::default();
    config.validate()?;
    info!(
        "Config: tick={}us ({} Hz), debounce={} ticks, watchdog={}ms",
        config.tick_period_us,
        config.tick_hz(),
        config.debounce_ticks,
        config.watchdog_timeout_ms,
    );

    // ── 3. Peripherals (outputs driven low here) ──────────────
    hw_init::init_peripherals()?;

    let hw = HardwareAdapter::new(
        PedalSwitch::new(GpioPin::new(pins::PEDAL_GPIO)),
        DialAdc::new(pins::DIAL_ADC_CHANNEL, config.adc_bits),
        SolenoidValve::new(GpioPin::new(pins::VALVE_GPIO)),
        PumpMotor::new(GpioPin::new(pins::PUMP_GPIO)),
    );
    let watchdog = Watchdog::new(config.watchdog_timeout_ms)?;

    // ── 4. Hand the control loop to the tick timer ────────────
    let control = Box::leak(Box::new(ControlLoop::new(
        config,
        hw,
        watchdog,
        QueueEventSink::new(),
    )));
    hw_timer::start_tick_timer(control, config.tick_period_us)?;

    // ── 5. Background loop ────────────────────────────────────
    let mut log_sink = LogEventSink::new();
    loop {
        drain_events(|event| log_sink.emit(&event));
        FreeRtos::delay_ms(DRAIN_INTERVAL_MS);
    }
}
