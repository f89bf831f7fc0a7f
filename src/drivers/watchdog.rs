//! Task Watchdog Timer (TWDT) driver.
//!
//! Wraps the ESP-IDF TWDT API to reset the device if the tick stops
//! running for longer than the configured period.  A trigger panics,
//! and the panic resets the chip, which reinitialises every output.
//!
//! The tick is registered as a TWDT *user* when the watchdog is built,
//! before the tick timer starts.  The watchdog is therefore armed even if
//! the timer callback never runs, and feeding does not depend on which
//! task executes the tick.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::app::ports::WatchdogPort;
use crate::drivers::hw_init::HwInitError;

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    user: esp_task_wdt_user_handle_t,
    #[cfg(not(target_os = "espidf"))]
    feeds: u64,
}

// SAFETY: the user handle is an opaque token owned by the TWDT component;
// esp_task_wdt_reset_user may be called from any task.
#[cfg(target_os = "espidf")]
unsafe impl Send for Watchdog {}

impl Watchdog {
    /// Configure the TWDT for `timeout_ms` with panic on trigger and
    /// register the tick as a user.
    #[cfg(target_os = "espidf")]
    pub fn new(timeout_ms: u32) -> Result<Self, HwInitError> {
        let cfg = esp_task_wdt_config_t {
            timeout_ms,
            idle_core_mask: 0,
            trigger_panic: true,
        };
        // SAFETY: called once from main() before the tick timer starts.
        let mut ret = unsafe { esp_task_wdt_reconfigure(&cfg) };
        if ret == ESP_ERR_INVALID_STATE as i32 {
            // TWDT not started by the bootloader config; start it ourselves.
            ret = unsafe { esp_task_wdt_init(&cfg) };
        }
        if ret != ESP_OK as i32 {
            return Err(HwInitError::WatchdogConfigFailed(ret));
        }

        let mut user: esp_task_wdt_user_handle_t = core::ptr::null_mut();
        // SAFETY: the name is a static C string; `user` outlives the call.
        let ret = unsafe { esp_task_wdt_add_user(c"tick".as_ptr(), &mut user) };
        if ret != ESP_OK as i32 || user.is_null() {
            return Err(HwInitError::WatchdogConfigFailed(ret));
        }

        info!("Watchdog: {}ms timeout, panic on trigger, tick user armed", timeout_ms);
        Ok(Self { timeout_ms, user })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(timeout_ms: u32) -> Result<Self, HwInitError> {
        log::info!("Watchdog(sim): {}ms, no-op", timeout_ms);
        Ok(Self {
            timeout_ms,
            feeds: 0,
        })
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// True once the tick is registered with the watchdog.
    #[cfg(target_os = "espidf")]
    pub fn is_armed(&self) -> bool {
        !self.user.is_null()
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn is_armed(&self) -> bool {
        true
    }

    /// Reset the tick user's countdown.
    ///
    /// A failed reset is not reported: the countdown keeps running and
    /// the resulting watchdog reset is the recovery path.
    #[cfg(target_os = "espidf")]
    pub fn feed(&mut self) {
        // SAFETY: `user` was returned by esp_task_wdt_add_user in new().
        unsafe {
            esp_task_wdt_reset_user(self.user);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn feed(&mut self) {
        self.feeds = self.feeds.wrapping_add(1);
    }

    /// Number of feeds so far (simulation only).
    #[cfg(not(target_os = "espidf"))]
    pub fn feeds(&self) -> u64 {
        self.feeds
    }
}

impl WatchdogPort for Watchdog {
    fn feed(&mut self) {
        Watchdog::feed(self);
    }
}
