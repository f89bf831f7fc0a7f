//! Flow-rate dial (potentiometer on ADC1).
//!
//! The ESP32-S3 oneshot ADC completes a conversion inside the read call,
//! so "in flight" is modelled as a pending flag: [`DialAdc::start`] arms a
//! conversion and the next [`DialAdc::poll`] performs and returns it.
//! Readings are shifted down from the native 12 bits to the configured
//! dial width so the classification thresholds stay in dial units.

use crate::drivers::hw_init;
use crate::pins;

pub struct DialAdc {
    channel: u32,
    shift: u8,
    pending: bool,
}

impl DialAdc {
    /// `bits` is the dial resolution the control core expects.
    pub fn new(channel: u32, bits: u8) -> Self {
        Self {
            channel,
            shift: pins::ADC_NATIVE_BITS.saturating_sub(bits),
            pending: false,
        }
    }

    pub fn start(&mut self) {
        self.pending = true;
    }

    /// Finished reading, or `None` if no conversion was started.  A failed
    /// read stays pending and is retried on the next poll.
    pub fn poll(&mut self) -> Option<u16> {
        if !self.pending {
            return None;
        }
        let raw = hw_init::adc1_read(self.channel)?;
        self.pending = false;
        Some(raw >> self.shift)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
