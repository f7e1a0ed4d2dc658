//! Shared device state.
//!
//! One `DeviceState` lives for the whole run and is shared by reference
//! between the management agent and the bell control loop. Each field is
//! its own atomic with acquire/release ordering so a write from one side
//! is visible to the other. Nothing here takes a lock.
//!
//! ## Known hazard
//!
//! Multi-field updates are not atomic as a group. [`DeviceState::start_pulse`]
//! stores `ring_at_ms` and then `pulse_until_ms`; a control-loop tick that
//! lands between the two stores sees the new start time with the old end
//! time. The next tick sees both, so the visible effect is at most one
//! animation frame computed from a mixed pair.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

/// Longest pulse window `is_pulsing` can tell apart from an expired one.
pub const MAX_PULSE_MS: u32 = i32::MAX as u32;

/// Timestamps are wrapping milliseconds since boot.
#[derive(Debug, Default)]
pub struct DeviceState {
    auto_pulse_interval_ms: AtomicU32,
    ring_at_ms: AtomicU32,
    pulse_until_ms: AtomicU32,
    strike_seq: AtomicU32,
    standing_brightness: AtomicU8,
    network_online: AtomicBool,
    management_online: AtomicBool,
}

impl DeviceState {
    pub const fn new() -> Self {
        Self {
            auto_pulse_interval_ms: AtomicU32::new(0),
            ring_at_ms: AtomicU32::new(0),
            pulse_until_ms: AtomicU32::new(0),
            strike_seq: AtomicU32::new(0),
            standing_brightness: AtomicU8::new(0),
            network_online: AtomicBool::new(false),
            management_online: AtomicBool::new(false),
        }
    }

    // ── Bell timing ───────────────────────────────────────────

    /// Interval between automatic pulses; 0 disables them.
    pub fn auto_pulse_interval_ms(&self) -> u32 {
        self.auto_pulse_interval_ms.load(Ordering::Acquire)
    }

    pub fn set_auto_pulse_interval_ms(&self, ms: u32) {
        self.auto_pulse_interval_ms.store(ms, Ordering::Release);
    }

    pub fn ring_at_ms(&self) -> u32 {
        self.ring_at_ms.load(Ordering::Acquire)
    }

    /// Record a strike of the bell at `now_ms`.
    ///
    /// Bumps the strike sequence so the control loop schedules a release
    /// even when `now_ms` equals the previous ring time.
    pub fn record_strike(&self, now_ms: u32) {
        self.ring_at_ms.store(now_ms, Ordering::Release);
        self.strike_seq.fetch_add(1, Ordering::AcqRel);
    }

    /// Number of strikes recorded so far, wrapping.
    pub fn strike_seq(&self) -> u32 {
        self.strike_seq.load(Ordering::Acquire)
    }

    pub fn pulse_until_ms(&self) -> u32 {
        self.pulse_until_ms.load(Ordering::Acquire)
    }

    /// Start a pulse at `now_ms` lasting `duration_ms`, clamped to
    /// [`MAX_PULSE_MS`].
    ///
    /// Two independent stores; see the module docs.
    pub fn start_pulse(&self, now_ms: u32, duration_ms: u32) {
        let duration_ms = duration_ms.min(MAX_PULSE_MS);
        self.ring_at_ms.store(now_ms, Ordering::Release);
        self.pulse_until_ms
            .store(now_ms.wrapping_add(duration_ms), Ordering::Release);
    }

    /// True while `now_ms` is before the end of the current pulse.
    pub fn is_pulsing(&self, now_ms: u32) -> bool {
        let until = self.pulse_until_ms();
        // Wrapping "now < until", valid up to MAX_PULSE_MS.
        (until.wrapping_sub(now_ms) as i32) > 0
    }

    // ── LED ───────────────────────────────────────────────────

    pub fn standing_brightness(&self) -> u8 {
        self.standing_brightness.load(Ordering::Acquire)
    }

    pub fn set_standing_brightness(&self, level: u8) {
        self.standing_brightness.store(level, Ordering::Release);
    }

    // ── Connectivity flags ────────────────────────────────────

    pub fn network_online(&self) -> bool {
        self.network_online.load(Ordering::Acquire)
    }

    pub fn set_network_online(&self, online: bool) {
        self.network_online.store(online, Ordering::Release);
    }

    /// Gates diagnostic traps; nothing is sent before the agent is up.
    pub fn management_online(&self) -> bool {
        self.management_online.load(Ordering::Acquire)
    }

    pub fn set_management_online(&self, online: bool) {
        self.management_online.store(online, Ordering::Release);
    }
}
