//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AgentEngine / BellController (domain)
//! ```
//!
//! Driven adapters (bell, LED, watchdog, boot image, clock, trap sender)
//! implement these traits. The domain consumes them via generics, so the
//! core never touches hardware directly.

use crate::error::ImageError;

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive the bell and LED.
pub trait ActuatorPort {
    /// Energise the bell striker.
    fn ring_bell(&mut self);

    /// Release the bell striker.
    fn release_bell(&mut self);

    /// Set LED brightness (0 = off, 255 = full).
    fn set_brightness(&mut self, level: u8);
}

// ───────────────────────────────────────────────────────────────
// Watchdog port
// ───────────────────────────────────────────────────────────────

pub trait WatchdogPort {
    /// Arm (or re-arm) the watchdog with `timeout_ms`.
    fn enable(&mut self, timeout_ms: u32);

    fn disable(&mut self);

    /// Restart the countdown.
    fn feed(&mut self);

    /// Stop serving and spin until the armed watchdog resets the chip.
    fn halt(&mut self) -> !;
}

// ───────────────────────────────────────────────────────────────
// Boot image port
// ───────────────────────────────────────────────────────────────

pub trait BootImagePort {
    /// Mark the running image as not to be booted again, so the next
    /// reset lands in the recovery loader and waits for new firmware.
    fn invalidate_image(&mut self) -> Result<(), ImageError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

pub trait ClockPort {
    /// Milliseconds since boot, wrapping at `u32::MAX`.
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Trap sink (domain → management station)
// ───────────────────────────────────────────────────────────────

/// Sends a short diagnostic text to the management station.
///
/// Callers gate on [`DeviceState::management_online`](crate::state::DeviceState::management_online);
/// implementations may assume the agent is up.
pub trait TrapSink {
    fn trap(&mut self, message: &str);
}

// ───────────────────────────────────────────────────────────────
// Combined device port
// ───────────────────────────────────────────────────────────────

/// Everything a management request may touch.
///
/// Lets the engine take one `hw` parameter instead of four, the same way
/// a single adapter implements every hardware-facing trait.
pub trait DevicePort: ActuatorPort + WatchdogPort + BootImagePort + ClockPort {}

impl<T: ActuatorPort + WatchdogPort + BootImagePort + ClockPort> DevicePort for T {}
