//! Mock hardware adapter for integration tests.
//!
//! Records every port call so tests can assert on the full command
//! history without touching real GPIO/PWM/watchdog registers.

use doorbell::app::ports::{ActuatorPort, BootImagePort, ClockPort, TrapSink, WatchdogPort};
use doorbell::error::ImageError;

/// Panic payload used by [`MockHardware::halt`].
pub const HALTED: &str = "halted";

// ── Port call record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    RingBell,
    ReleaseBell,
    SetBrightness(u8),
    WatchdogEnable(u32),
    WatchdogDisable,
    WatchdogFeed,
    InvalidateImage,
    Halt,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    pub now_ms: u32,
    /// When set, `invalidate_image` fails with this error.
    pub image_error: Option<ImageError>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            now_ms: 0,
            image_error: None,
        }
    }

    pub fn at(now_ms: u32) -> Self {
        Self {
            now_ms,
            ..Self::new()
        }
    }

    pub fn last_call(&self) -> Option<&HwCall> {
        self.calls.last()
    }

    pub fn count(&self, call: HwCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    pub fn brightness_writes(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::SetBrightness(l) => Some(*l),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for MockHardware {
    fn ring_bell(&mut self) {
        self.calls.push(HwCall::RingBell);
    }

    fn release_bell(&mut self) {
        self.calls.push(HwCall::ReleaseBell);
    }

    fn set_brightness(&mut self, level: u8) {
        self.calls.push(HwCall::SetBrightness(level));
    }
}

impl WatchdogPort for MockHardware {
    fn enable(&mut self, timeout_ms: u32) {
        self.calls.push(HwCall::WatchdogEnable(timeout_ms));
    }

    fn disable(&mut self) {
        self.calls.push(HwCall::WatchdogDisable);
    }

    fn feed(&mut self) {
        self.calls.push(HwCall::WatchdogFeed);
    }

    fn halt(&mut self) -> ! {
        self.calls.push(HwCall::Halt);
        panic!("{HALTED}");
    }
}

impl BootImagePort for MockHardware {
    fn invalidate_image(&mut self) -> Result<(), ImageError> {
        self.calls.push(HwCall::InvalidateImage);
        match self.image_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ClockPort for MockHardware {
    fn now_ms(&self) -> u32 {
        self.now_ms
    }
}

// ── RecordingTraps ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingTraps {
    pub traps: Vec<String>,
}

#[allow(dead_code)]
impl RecordingTraps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.traps.iter().any(|t| t == text)
    }
}

impl TrapSink for RecordingTraps {
    fn trap(&mut self, message: &str) {
        self.traps.push(message.to_owned());
    }
}
