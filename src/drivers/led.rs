//! Doorbell button LED driver.
//!
//! One LEDC PWM channel dims the button ring. Brightness is 0–255 and is
//! mapped onto whatever duty resolution the channel was configured with.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::ActuatorError;

pub struct LedDriver<P: SetDutyCycle> {
    channel: P,
    level: u8,
}

impl<P: SetDutyCycle> LedDriver<P> {
    pub fn new(channel: P) -> Self {
        Self { channel, level: 0 }
    }

    pub fn set(&mut self, level: u8) -> Result<(), ActuatorError> {
        self.channel
            .set_duty_cycle_fraction(u16::from(level), u16::from(u8::MAX))
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.level = level;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.set(0)
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}
