//! Doorbell controller firmware library.
//!
//! Exposes the pure-logic modules (management agent, object registry,
//! memory introspection, bell control loop) for integration testing and
//! the fuzz harness. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod agent;
pub mod app;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod memory;
pub mod mib;
pub mod pins;
pub mod state;

pub mod adapters;
pub mod drivers;
