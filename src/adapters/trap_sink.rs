//! Log-based trap sink adapter.
//!
//! Implements [`TrapSink`] by writing each trap to the ESP-IDF logger
//! (UART / USB-CDC in production). The UDP trap sender of the management
//! transport would implement the same trait.

use log::info;

use crate::app::ports::TrapSink;

/// Adapter that logs every trap to the serial console.
#[derive(Default)]
pub struct LogTrapSink {
    sent: u32,
}

impl LogTrapSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Traps sent since boot.
    pub fn sent(&self) -> u32 {
        self.sent
    }
}

impl TrapSink for LogTrapSink {
    fn trap(&mut self, message: &str) {
        self.sent = self.sent.wrapping_add(1);
        info!("TRAP | #{} | {}", self.sent, message);
    }
}
