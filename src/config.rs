//! Device configuration parameters
//!
//! Identity strings reported in the system group, actuator limits, and
//! the timing constants of the watchdog and the bell control loop.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Capacity of every identity string (matches the agent's text buffer).
pub const IDENTITY_LEN: usize = 32;

/// Core device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    // --- Identity (system group) ---
    /// sysDescr
    pub description: String<IDENTITY_LEN>,
    /// sysObjectID, dotted form
    pub object_id: String<IDENTITY_LEN>,
    /// sysContact
    pub contact: String<IDENTITY_LEN>,
    /// sysName
    pub name: String<IDENTITY_LEN>,
    /// sysLocation
    pub location: String<IDENTITY_LEN>,
    /// sysServices bitmask (72 = application + end-to-end)
    pub services: i32,

    // --- LED ---
    /// Highest brightness the LED PWM accepts
    pub max_brightness: u8,

    // --- Watchdog ---
    /// Timeout armed by the watchdog-enable trigger (milliseconds)
    pub watchdog_timeout_ms: u32,
    /// Short timeout armed before halting for reprogramming (milliseconds)
    pub reprogram_timeout_ms: u32,

    // --- Bell control loop ---
    /// Control loop tick (milliseconds)
    pub control_tick_ms: u32,
    /// One full breathing ramp while pulsing (milliseconds)
    pub pulse_period_ms: u32,
    /// Pulse length started by the automatic pulse timer (seconds)
    pub auto_pulse_secs: u32,
    /// How long the bell striker stays energised per ring (milliseconds)
    pub bell_strike_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            description: identity("SNMP Doorbell"),
            object_id: identity("1.3.6.1.4.1.50174.258.1"),
            contact: identity("Jonathan Steinert"),
            name: identity("Front Door"),
            location: identity("Hachi's house"),
            services: 72,

            max_brightness: u8::MAX,

            watchdog_timeout_ms: 8_000,
            reprogram_timeout_ms: 2_000,

            control_tick_ms: 20,    // 50 Hz animation
            pulse_period_ms: 2_000, // 0.5 Hz breathing
            auto_pulse_secs: 5,
            bell_strike_ms: 150,
        }
    }
}

impl DeviceConfig {
    /// Reject parameter combinations the control loop cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.max_brightness == 0 {
            return Err(Error::Config("max_brightness must be non-zero"));
        }
        if self.control_tick_ms == 0 {
            return Err(Error::Config("control_tick_ms must be non-zero"));
        }
        if self.pulse_period_ms < 2 * self.control_tick_ms {
            return Err(Error::Config("pulse_period_ms shorter than two control ticks"));
        }
        if self.reprogram_timeout_ms == 0 || self.watchdog_timeout_ms == 0 {
            return Err(Error::Config("watchdog timeouts must be non-zero"));
        }
        if self.reprogram_timeout_ms > self.watchdog_timeout_ms {
            return Err(Error::Config("reprogram timeout exceeds watchdog timeout"));
        }
        Ok(())
    }
}

impl DeviceConfig {
    /// Parse and validate a JSON document, e.g. one baked in at build time.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON config"))?;
        config.validate()?;
        Ok(config)
    }

    /// Decode and validate a compact postcard blob (provisioning image).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let config: Self =
            postcard::from_bytes(bytes).map_err(|_| Error::Config("malformed config blob"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| Error::Config("config does not serialise"))
    }
}

/// Copy `text`, cut at [`IDENTITY_LEN`] bytes on a char boundary.
fn identity(text: &str) -> String<IDENTITY_LEN> {
    let mut end = text.len().min(IDENTITY_LEN);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut s = String::new();
    let _ = s.push_str(&text[..end]);
    s
}
