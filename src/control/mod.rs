//! Periodic control loops driven from the main loop.

pub mod bell;

pub use bell::BellController;
