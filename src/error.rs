//! Unified error types for the doorbell firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the main
//! loop handles failures uniformly. All variants are `Copy` so they can be
//! passed through the agent and the control loop without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A management request could not be answered.
    Management(ManagementError),
    /// An actuator command failed.
    Actuator(ActuatorError),
    /// The boot image could not be updated.
    Image(ImageError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Management(e) => write!(f, "management: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Image(e) => write!(f, "image: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Management errors
// ---------------------------------------------------------------------------

/// Errors returned to the manager in the same request/response cycle.
///
/// None of these are retried by the agent. The transport maps them onto
/// the wire-level error status of the response PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementError {
    /// Identifier not registered, past the end of the table, or an
    /// unsupported request kind.
    NoSuchName,
    /// SET against an object without a writer.
    ReadOnly,
    /// The SET value is missing, of the wrong type, or outside the range
    /// of the backing field.
    DecodeFailure,
    /// A writer could not complete because a collaborator failed
    /// (e.g. the boot image could not be invalidated).
    ResourceUnavailable,
}

impl fmt::Display for ManagementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchName => write!(f, "no such name"),
            Self::ReadOnly => write!(f, "read-only"),
            Self::DecodeFailure => write!(f, "value decode failed"),
            Self::ResourceUnavailable => write!(f, "resource unavailable"),
        }
    }
}

impl From<ManagementError> for Error {
    fn from(e: ManagementError) -> Self {
        Self::Management(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Boot image errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageError {
    /// No recovery partition is present in the partition table.
    RecoveryMissing,
    /// The bootloader refused the new boot selection (raw esp_err_t).
    BootSelectFailed(i32),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecoveryMissing => write!(f, "recovery partition missing"),
            Self::BootSelectFailed(rc) => write!(f, "boot partition select failed (rc={rc})"),
        }
    }
}

impl From<ImageError> for Error {
    fn from(e: ImageError) -> Self {
        Self::Image(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
