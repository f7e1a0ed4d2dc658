//! Bell striker driver.
//!
//! A single push-pull output drives the solenoid through a low-side
//! MOSFET. HIGH energises the striker; the control loop releases it after
//! a short strike.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;

pub struct BellDriver<P: OutputPin> {
    pin: P,
    struck: bool,
    strikes: u32,
}

impl<P: OutputPin> BellDriver<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            struck: false,
            strikes: 0,
        }
    }

    pub fn strike(&mut self) -> Result<(), ActuatorError> {
        self.pin
            .set_high()
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.struck = true;
        self.strikes = self.strikes.wrapping_add(1);
        Ok(())
    }

    pub fn release(&mut self) -> Result<(), ActuatorError> {
        self.pin
            .set_low()
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.struck = false;
        Ok(())
    }

    pub fn is_struck(&self) -> bool {
        self.struck
    }

    /// Strikes since boot.
    pub fn strikes(&self) -> u32 {
        self.strikes
    }
}
