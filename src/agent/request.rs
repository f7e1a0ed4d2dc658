//! Request and response types exchanged with the transport.

use core::fmt;

use log::warn;

use crate::app::ports::WatchdogPort;
use crate::error::ManagementError;
use crate::mib::{Oid, Value};

/// Protocol operation of an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Get,
    GetNext,
    Set,
    /// Decoded but not served by this agent.
    GetBulk,
    /// Any other PDU tag, carried so it can be logged.
    Other(u8),
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::GetNext => write!(f, "GET-NEXT"),
            Self::Set => write!(f, "SET"),
            Self::GetBulk => write!(f, "GET-BULK"),
            Self::Other(tag) => write!(f, "PDU(0x{tag:02x})"),
        }
    }
}

/// One variable binding, already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub kind: RequestKind,
    pub oid: Oid,
    /// Present on SET; ignored otherwise.
    pub value: Option<Value>,
}

impl Request {
    pub fn get(oid: Oid) -> Self {
        Self {
            kind: RequestKind::Get,
            oid,
            value: None,
        }
    }

    pub fn get_next(oid: Oid) -> Self {
        Self {
            kind: RequestKind::GetNext,
            oid,
            value: None,
        }
    }

    pub fn set(oid: Oid, value: Value) -> Self {
        Self {
            kind: RequestKind::Set,
            oid,
            value: Some(value),
        }
    }
}

/// Answer to one request.
///
/// `oid` differs from the request's identifier only for GET-NEXT, where it
/// names the object that was actually read (or the end-of-tree sentinel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The request kind being answered.
    pub kind: RequestKind,
    pub oid: Oid,
    pub result: Result<Value, ManagementError>,
}

/// What the caller must do after a dispatch.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Send the response and keep serving.
    Respond(Response),
    /// Send the response, then halt until the watchdog resets the device.
    Reboot(PendingReboot),
}

impl Outcome {
    pub fn response(&self) -> &Response {
        match self {
            Self::Respond(r) => r,
            Self::Reboot(p) => &p.response,
        }
    }

    pub fn is_reboot(&self) -> bool {
        matches!(self, Self::Reboot(_))
    }
}

/// A reboot the agent has committed to.
///
/// The boot image is already invalidated when this exists. The only way
/// forward is [`PendingReboot::halt`] once the response is on the wire.
#[must_use = "the device must halt after sending the response"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReboot {
    response: Response,
    timeout_ms: u32,
}

impl PendingReboot {
    pub(crate) fn new(response: Response, timeout_ms: u32) -> Self {
        Self {
            response,
            timeout_ms,
        }
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Watchdog timeout that will reset the device.
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Re-arm the watchdog with the short timeout and stop.
    pub fn halt(self, watchdog: &mut impl WatchdogPort) -> ! {
        warn!("reprogram: halting, watchdog reset in {} ms", self.timeout_ms);
        watchdog.disable();
        watchdog.enable(self.timeout_ms);
        watchdog.halt()
    }
}
