//! Periodic tick timer using ESP-IDF's esp_timer API.
//!
//! The timer callback receives a pointer to a [`TickHandler`] leaked at
//! startup and calls [`TickHandler::on_tick`] on it.  esp_timer dispatches
//! callbacks one at a time from its own task, so the handler is the sole
//! owner of everything it holds; no lock is needed around the tick.
//!
//! On simulation targets a plain thread sleeps between ticks.

use crate::drivers::hw_init::HwInitError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

/// Work executed once per timer tick.
pub trait TickHandler {
    fn on_tick(&mut self);
}

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_trampoline<T: TickHandler>(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `&'static mut T` handed to `start_tick_timer`.
    // Nothing else holds a reference to it and callbacks never overlap.
    let handler = unsafe { &mut *arg.cast::<T>() };
    handler.on_tick();
}

/// Start calling `handler.on_tick()` every `period_us` microseconds.
///
/// The handler is moved into the timer context for the rest of the
/// program's life.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer<T>(handler: &'static mut T, period_us: u32) -> Result<(), HwInitError>
where
    T: TickHandler + Send + 'static,
{
    // SAFETY: TICK_TIMER is written here once at boot from the main task
    // before the timer runs.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_trampoline::<T>),
            arg: core::ptr::from_mut(handler).cast(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"tick".as_ptr(),
            // A late tick is dropped rather than replayed in a burst.
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerStartFailed(ret));
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, u64::from(period_us));
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerStartFailed(ret));
        }
    }

    info!("hw_timer: tick every {}us started", period_us);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer<T>(handler: &'static mut T, period_us: u32) -> Result<(), HwInitError>
where
    T: TickHandler + Send + 'static,
{
    use std::time::Duration;

    sim::STOP.store(false, core::sync::atomic::Ordering::Relaxed);
    let period = Duration::from_micros(u64::from(period_us));
    std::thread::Builder::new()
        .name("tick".into())
        .spawn(move || {
            while !sim::STOP.load(core::sync::atomic::Ordering::Relaxed) {
                std::thread::sleep(period);
                handler.on_tick();
            }
        })
        .map_err(|_| HwInitError::TimerStartFailed(-1))?;

    log::info!("hw_timer(sim): tick thread every {}us", period_us);
    Ok(())
}

/// Stop the tick timer.
#[cfg(target_os = "espidf")]
pub fn stop_tick_timer() {
    // SAFETY: TICK_TIMER is a valid handle if start_tick_timer() succeeded;
    // the null check covers the case where it did not.
    unsafe {
        let timer = TICK_TIMER;
        if !timer.is_null() {
            esp_timer_stop(timer);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_tick_timer() {
    sim::STOP.store(true, core::sync::atomic::Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::AtomicBool;

    pub(super) static STOP: AtomicBool = AtomicBool::new(false);
}
