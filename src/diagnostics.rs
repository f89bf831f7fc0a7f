//! Boot diagnostics: reset cause and panic logging.
//!
//! A watchdog trip or panic resets the chip, and every output comes back
//! up closed.  The only trace left is the reset reason, so it is logged
//! first thing at boot.

use serde::Serialize;

/// Why the chip last came out of reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResetReason {
    PowerOn,
    External,
    Software,
    Panic,
    TaskWatchdog,
    InterruptWatchdog,
    OtherWatchdog,
    DeepSleep,
    Brownout,
    Unknown,
}

impl ResetReason {
    /// Read the reset cause from the ROM.
    #[cfg(target_os = "espidf")]
    pub fn read() -> Self {
        use esp_idf_svc::sys::*;

        // SAFETY: esp_reset_reason reads a value latched at boot.
        let raw = unsafe { esp_reset_reason() };
        #[allow(non_upper_case_globals)]
        match raw {
            esp_reset_reason_t_ESP_RST_POWERON => Self::PowerOn,
            esp_reset_reason_t_ESP_RST_EXT => Self::External,
            esp_reset_reason_t_ESP_RST_SW => Self::Software,
            esp_reset_reason_t_ESP_RST_PANIC => Self::Panic,
            esp_reset_reason_t_ESP_RST_TASK_WDT => Self::TaskWatchdog,
            esp_reset_reason_t_ESP_RST_INT_WDT => Self::InterruptWatchdog,
            esp_reset_reason_t_ESP_RST_WDT => Self::OtherWatchdog,
            esp_reset_reason_t_ESP_RST_DEEPSLEEP => Self::DeepSleep,
            esp_reset_reason_t_ESP_RST_BROWNOUT => Self::Brownout,
            _ => Self::Unknown,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read() -> Self {
        Self::PowerOn
    }

    /// True when the previous run ended abnormally.
    pub fn is_fault(self) -> bool {
        matches!(
            self,
            Self::Panic
                | Self::TaskWatchdog
                | Self::InterruptWatchdog
                | Self::OtherWatchdog
                | Self::Brownout
        )
    }
}

/// Log the reset reason; faults are logged at warn level.
pub fn log_reset_reason() -> ResetReason {
    let reason = ResetReason::read();
    if reason.is_fault() {
        log::warn!("Reset reason: {:?} (previous run faulted)", reason);
    } else {
        log::info!("Reset reason: {:?}", reason);
    }
    reason
}

/// Install a panic hook that logs the panic message before the reset.
pub fn install_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let reason = if let Some(msg) = info.payload().downcast_ref::<&str>() {
            *msg
        } else if let Some(msg) = info.payload().downcast_ref::<String>() {
            msg.as_str()
        } else {
            "unknown panic"
        };

        match info.location() {
            Some(loc) => log::error!("PANIC: {} at {}:{}", reason, loc.file(), loc.line()),
            None => log::error!("PANIC: {}", reason),
        }
    }));
}
