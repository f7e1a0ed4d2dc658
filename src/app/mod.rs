//! Application boundary: the port traits the core is written against.
//!
//! The agent and the bell control loop never touch hardware directly.
//! Everything they drive goes through the traits in [`ports`], keeping
//! both fully testable without real peripherals.

pub mod ports;
