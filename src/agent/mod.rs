//! Management agent: resolves GET / GET-NEXT / SET against the registry.
//!
//! ```text
//!   transport ──Request──▶ AgentEngine::dispatch ──Outcome──▶ transport
//!                               │
//!                 Registry ◀────┼────▶ DeviceState / DevicePort / MemoryLayout
//! ```
//!
//! The agent owns no transport. Callers poll a [`ManagementTransport`],
//! hand each decoded request to the engine and send back what it returns.

pub mod engine;
pub mod request;
pub mod transport;

pub use engine::AgentEngine;
pub use request::{Outcome, PendingReboot, Request, RequestKind, Response};
pub use transport::{ManagementTransport, NullTransport};
