//! Bell and LED control loop.
//!
//! Called once per control tick. Reads the shared state written by the
//! agent and turns it into actuator commands:
//!
//! ```text
//!   auto_pulse_interval ──▶ start pulse every N ms
//!   ring_at / pulse_until ─▶ breathing ramp  standing ↗ max ↘ standing
//!   strike_seq bumped ────▶ release striker after bell_strike_ms
//! ```
//!
//! The LED is only written when the computed level changes.

use log::debug;

use crate::app::ports::ActuatorPort;
use crate::config::DeviceConfig;
use crate::state::DeviceState;

pub struct BellController {
    max_brightness: u8,
    pulse_period_ms: u32,
    auto_pulse_ms: u32,
    strike_ms: u32,
    last_level: Option<u8>,
    last_strike: u32,
    release_at: Option<u32>,
}

impl BellController {
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            max_brightness: config.max_brightness,
            pulse_period_ms: config.pulse_period_ms.max(2),
            auto_pulse_ms: config.auto_pulse_secs.saturating_mul(1000),
            strike_ms: config.bell_strike_ms,
            last_level: None,
            last_strike: 0,
            release_at: None,
        }
    }

    /// Advance the loop to `now_ms`. Returns the LED level in effect.
    pub fn tick(&mut self, now_ms: u32, state: &DeviceState, hw: &mut impl ActuatorPort) -> u8 {
        let interval = state.auto_pulse_interval_ms();
        if interval > 0 && now_ms.wrapping_sub(state.ring_at_ms()) >= interval {
            debug!("auto pulse at {now_ms} ms");
            state.start_pulse(now_ms, self.auto_pulse_ms);
        }

        let strike = state.strike_seq();
        if strike != self.last_strike {
            self.last_strike = strike;
            self.release_at = Some(state.ring_at_ms().wrapping_add(self.strike_ms));
        }
        if let Some(at) = self.release_at {
            if !before(now_ms, at) {
                hw.release_bell();
                self.release_at = None;
            }
        }

        let level = self.level(now_ms, state);
        if self.last_level != Some(level) {
            hw.set_brightness(level);
            self.last_level = Some(level);
        }
        level
    }

    /// LED level at `now_ms` without side effects.
    pub fn level(&self, now_ms: u32, state: &DeviceState) -> u8 {
        let standing = state.standing_brightness().min(self.max_brightness);
        if !state.is_pulsing(now_ms) {
            return standing;
        }
        let phase = now_ms.wrapping_sub(state.ring_at_ms());
        let ramp = u32::from(triangle(phase, self.pulse_period_ms));
        let span = u32::from(self.max_brightness - standing);
        standing + (span * ramp / 255) as u8
    }
}

/// 0 → 255 → 0 over `period_ms`.
fn triangle(phase_ms: u32, period_ms: u32) -> u8 {
    let pos = u64::from(phase_ms % period_ms);
    let half = u64::from(period_ms) / 2;
    if pos < half {
        ((pos * 255) / half) as u8
    } else {
        (((u64::from(period_ms) - pos) * 255) / half).min(255) as u8
    }
}

/// Wrapping `a < b`.
fn before(a: u32, b: u32) -> bool {
    (b.wrapping_sub(a) as i32) > 0
}
