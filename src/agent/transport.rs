//! Transport abstraction: the decoded side of the management protocol.
//!
//! Concrete implementations own the socket and the PDU codec. The agent
//! only sees semantic [`Request`]s and [`Response`]s, so swapping the
//! wire format requires zero changes to the dispatch logic.

use super::request::{Request, Response};

pub trait ManagementTransport {
    type Error: core::fmt::Debug;

    /// Next decoded request, or `None` if nothing is pending (non-blocking).
    fn poll_request(&mut self) -> Result<Option<Request>, Self::Error>;

    /// Encode and send one response.
    fn send_response(&mut self, response: &Response) -> Result<(), Self::Error>;
}

/// A transport that never receives and discards every response.
/// Used when no management network is configured.
pub struct NullTransport;

impl ManagementTransport for NullTransport {
    type Error = ();

    fn poll_request(&mut self) -> Result<Option<Request>, ()> {
        Ok(None)
    }

    fn send_response(&mut self, _response: &Response) -> Result<(), ()> {
        Ok(())
    }
}
