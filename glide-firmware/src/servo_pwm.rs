//! RP2040 PWM slice as an `embedded-hal` duty cycle channel
//!
//! The slice is clocked at 1 MHz so one counter step is one microsecond,
//! and wraps every 20 ms for the 50 Hz servo frame.

use core::convert::Infallible;

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embedded_hal::pwm::{ErrorType, SetDutyCycle};

/// System clock divided down to 1 MHz
const CLOCK_DIVIDER: u8 = 125;

/// Servo PWM output on channel A of a slice
pub struct RpServoPwm {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl RpServoPwm {
    /// Configure the slice for a servo frame of `frame_period_us`
    ///
    /// The output starts fully off.
    pub fn new(mut pwm: Pwm<'static>, frame_period_us: u16) -> Self {
        let mut config = PwmConfig::default();
        config.divider = CLOCK_DIVIDER.into();
        config.top = frame_period_us.saturating_sub(1);
        config.compare_a = 0;
        pwm.set_config(&config);

        Self { pwm, config }
    }
}

impl ErrorType for RpServoPwm {
    type Error = Infallible;
}

impl SetDutyCycle for RpServoPwm {
    fn max_duty_cycle(&self) -> u16 {
        // A compare value past `top` holds the output high
        self.config.top.saturating_add(1)
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.config.compare_a = duty;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}
