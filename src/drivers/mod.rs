//! Actuator and watchdog drivers.

pub mod bell;
pub mod led;
pub mod watchdog;
