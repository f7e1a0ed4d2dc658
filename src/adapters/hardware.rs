//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the bell and LED drivers, the watchdog, the boot image and the
//! clock, exposing them through [`ActuatorPort`], [`WatchdogPort`],
//! [`BootImagePort`] and [`ClockPort`]. This is the only module in the
//! system that touches actual hardware. The drivers are generic over the
//! `embedded-hal` traits, so host tests plug in in-memory pins.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::adapters::boot_image::BootImage;
use crate::adapters::time::SystemClock;
use crate::app::ports::{ActuatorPort, BootImagePort, ClockPort, WatchdogPort};
use crate::drivers::bell::BellDriver;
use crate::drivers::led::LedDriver;
use crate::drivers::watchdog::Watchdog;
use crate::error::ImageError;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<B: OutputPin, L: SetDutyCycle> {
    bell: BellDriver<B>,
    led: LedDriver<L>,
    watchdog: Watchdog,
    image: BootImage,
    clock: SystemClock,
}

impl<B: OutputPin, L: SetDutyCycle> HardwareAdapter<B, L> {
    pub fn new(bell: BellDriver<B>, led: LedDriver<L>, watchdog: Watchdog, clock: SystemClock) -> Self {
        Self {
            bell,
            led,
            watchdog,
            image: BootImage::new(),
            clock,
        }
    }

    pub fn bell(&self) -> &BellDriver<B> {
        &self.bell
    }

    pub fn led(&self) -> &LedDriver<L> {
        &self.led
    }

    pub fn watchdog(&self) -> &Watchdog {
        &self.watchdog
    }

    pub fn image(&self) -> &BootImage {
        &self.image
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<B: OutputPin, L: SetDutyCycle> ActuatorPort for HardwareAdapter<B, L> {
    fn ring_bell(&mut self) {
        if let Err(e) = self.bell.strike() {
            warn!("bell strike failed: {}", e);
        }
    }

    fn release_bell(&mut self) {
        if let Err(e) = self.bell.release() {
            warn!("bell release failed: {}", e);
        }
    }

    fn set_brightness(&mut self, level: u8) {
        if let Err(e) = self.led.set(level) {
            warn!("LED brightness {} failed: {}", level, e);
        }
    }
}

// ── WatchdogPort implementation ───────────────────────────────

impl<B: OutputPin, L: SetDutyCycle> WatchdogPort for HardwareAdapter<B, L> {
    fn enable(&mut self, timeout_ms: u32) {
        self.watchdog.enable(timeout_ms);
    }

    fn disable(&mut self) {
        self.watchdog.disable();
    }

    fn feed(&mut self) {
        self.watchdog.feed();
    }

    fn halt(&mut self) -> ! {
        // Leave the striker and LED in a safe state before going quiet.
        let _ = self.bell.release();
        let _ = self.led.off();
        self.watchdog.halt()
    }
}

// ── BootImagePort / ClockPort implementation ──────────────────

impl<B: OutputPin, L: SetDutyCycle> BootImagePort for HardwareAdapter<B, L> {
    fn invalidate_image(&mut self) -> Result<(), ImageError> {
        self.image.invalidate_image()
    }
}

impl<B: OutputPin, L: SetDutyCycle> ClockPort for HardwareAdapter<B, L> {
    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}
