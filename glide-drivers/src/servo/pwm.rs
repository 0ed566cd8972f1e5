//! Hobby servo over a PWM channel
//!
//! A servo reads the width of a pulse repeated every frame (20 ms for
//! standard analog servos). The PWM channel must already run at the frame
//! rate; this driver only maps pulse widths to duty cycles.
//!
//! # Usage
//!
//! ```ignore
//! let mut servo = PwmServo::new(channel, PwmServoConfig::default());
//! servo.attach(PinId(14));
//! servo.write_microseconds(1500); // centre
//! ```

use embedded_hal::pwm::SetDutyCycle;
use glide_core::traits::{Actuator, PinId};

/// PWM servo configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmServoConfig {
    /// Length of one PWM frame in microseconds
    pub frame_period_us: u16,
}

impl Default for PwmServoConfig {
    fn default() -> Self {
        Self {
            frame_period_us: 20_000, // 50 Hz
        }
    }
}

/// Hobby servo driven by a PWM channel
///
/// While detached the channel is held fully off and writes only update the
/// remembered pulse width, which is output again on the next attach.
pub struct PwmServo<P> {
    pwm: P,
    config: PwmServoConfig,
    pin: Option<PinId>,
    /// Last commanded pulse width, if any
    pulse_us: Option<i32>,
    /// Duty writes the channel rejected
    faults: u32,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Create a detached servo
    pub fn new(pwm: P, config: PwmServoConfig) -> Self {
        Self {
            pwm,
            config,
            pin: None,
            pulse_us: None,
            faults: 0,
        }
    }

    /// Pin the servo is attached to
    pub fn pin(&self) -> Option<PinId> {
        self.pin
    }

    /// Last commanded pulse width
    pub fn pulse_us(&self) -> Option<i32> {
        self.pulse_us
    }

    /// Number of duty cycle updates the PWM channel rejected
    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    /// Get the configuration
    pub fn config(&self) -> &PwmServoConfig {
        &self.config
    }

    /// Get access to the underlying PWM channel
    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Pulse width clamped to a single frame
    fn clamp_pulse(&self, pulse_us: i32) -> u16 {
        pulse_us.clamp(0, self.config.frame_period_us as i32) as u16
    }

    fn output(&mut self, pulse_us: i32) {
        let period = self.config.frame_period_us;
        let result = if period == 0 {
            self.pwm.set_duty_cycle_fully_off()
        } else {
            let pulse = self.clamp_pulse(pulse_us);
            self.pwm.set_duty_cycle_fraction(pulse, period)
        };
        self.record(result);
    }

    fn record(&mut self, result: Result<(), P::Error>) {
        if result.is_err() {
            self.faults = self.faults.saturating_add(1);

            #[cfg(feature = "defmt")]
            defmt::warn!("Servo duty write failed ({} total)", self.faults);
        }
    }
}

impl<P: SetDutyCycle> Actuator for PwmServo<P> {
    fn attach(&mut self, pin: PinId) {
        self.pin = Some(pin);
        if let Some(pulse) = self.pulse_us {
            self.output(pulse);
        }
    }

    fn detach(&mut self) {
        self.pin = None;
        let result = self.pwm.set_duty_cycle_fully_off();
        self.record(result);
    }

    fn write_microseconds(&mut self, pulse_us: i32) {
        self.pulse_us = Some(pulse_us);
        if self.pin.is_some() {
            self.output(pulse_us);
        }
    }

    fn is_attached(&self) -> bool {
        self.pin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::{ErrorKind, ErrorType};

    // Mock PWM channel with one count per microsecond at 50 Hz
    struct MockPwm {
        max: u16,
        duty: u16,
        writes: u32,
    }

    impl MockPwm {
        fn new() -> Self {
            Self {
                max: 20_000,
                duty: 0,
                writes: 0,
            }
        }
    }

    impl ErrorType for MockPwm {
        type Error = core::convert::Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            self.writes += 1;
            Ok(())
        }
    }

    #[derive(Debug)]
    struct MockError;

    impl embedded_hal::pwm::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    // PWM channel that rejects every update
    struct FailingPwm;

    impl ErrorType for FailingPwm {
        type Error = MockError;
    }

    impl SetDutyCycle for FailingPwm {
        fn max_duty_cycle(&self) -> u16 {
            20_000
        }

        fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
            Err(MockError)
        }
    }

    fn attached_servo() -> PwmServo<MockPwm> {
        let mut servo = PwmServo::new(MockPwm::new(), PwmServoConfig::default());
        servo.attach(PinId(14));
        servo
    }

    #[test]
    fn test_new_servo_is_detached() {
        let servo = PwmServo::new(MockPwm::new(), PwmServoConfig::default());
        assert!(!servo.is_attached());
        assert_eq!(servo.pulse_us(), None);
        assert_eq!(servo.pwm().writes, 0);
    }

    #[test]
    fn test_pulse_maps_to_duty() {
        let mut servo = attached_servo();

        servo.write_microseconds(1500);
        assert_eq!(servo.pwm().duty, 1500);

        servo.write_microseconds(550);
        assert_eq!(servo.pwm().duty, 550);
    }

    #[test]
    fn test_duty_scales_with_channel_resolution() {
        let mut pwm = MockPwm::new();
        pwm.max = 10_000;
        let mut servo = PwmServo::new(pwm, PwmServoConfig::default());
        servo.attach(PinId(0));

        servo.write_microseconds(2000);
        assert_eq!(servo.pwm().duty, 1000);
    }

    #[test]
    fn test_pulse_clamped_to_frame() {
        let mut servo = attached_servo();

        servo.write_microseconds(-40);
        assert_eq!(servo.pwm().duty, 0);

        servo.write_microseconds(25_000);
        assert_eq!(servo.pwm().duty, 20_000);
        // The unclamped value is what was commanded
        assert_eq!(servo.pulse_us(), Some(25_000));
    }

    #[test]
    fn test_write_while_detached_is_deferred() {
        let mut servo = PwmServo::new(MockPwm::new(), PwmServoConfig::default());

        servo.write_microseconds(1200);
        assert_eq!(servo.pwm().writes, 0);

        servo.attach(PinId(14));
        assert_eq!(servo.pin(), Some(PinId(14)));
        assert_eq!(servo.pwm().duty, 1200);
    }

    #[test]
    fn test_attach_without_pulse_keeps_output_idle() {
        let mut servo = PwmServo::new(MockPwm::new(), PwmServoConfig::default());
        servo.attach(PinId(14));

        assert!(servo.is_attached());
        assert_eq!(servo.pwm().writes, 0);
    }

    #[test]
    fn test_detach_turns_output_off() {
        let mut servo = attached_servo();
        servo.write_microseconds(1800);

        servo.detach();
        assert!(!servo.is_attached());
        assert_eq!(servo.pwm().duty, 0);
        assert_eq!(servo.pulse_us(), Some(1800));
    }

    #[test]
    fn test_failed_writes_are_counted() {
        let mut servo = PwmServo::new(FailingPwm, PwmServoConfig::default());
        servo.attach(PinId(14));

        servo.write_microseconds(1500);
        servo.write_microseconds(1600);
        servo.detach();

        assert_eq!(servo.fault_count(), 3);
        // Failures do not lose the commanded position
        assert_eq!(servo.pulse_us(), Some(1600));
    }

    #[test]
    fn test_zero_frame_period_turns_output_off() {
        let config = PwmServoConfig { frame_period_us: 0 };
        let mut servo = PwmServo::new(MockPwm::new(), config);
        servo.attach(PinId(14));

        servo.write_microseconds(1500);
        assert_eq!(servo.pwm().duty, 0);
        assert_eq!(servo.fault_count(), 0);
    }

    #[test]
    fn test_drives_motion_controller() {
        use glide_core::config::MotionConfig;
        use glide_core::motion::MotionController;

        let servo = PwmServo::new(MockPwm::new(), PwmServoConfig::default());
        let mut ctrl = MotionController::new(servo, MotionConfig::default());
        ctrl.attach(PinId(14));
        ctrl.set_target(2000);

        for t in 1..=210 {
            ctrl.tick(t * 5);
        }

        assert_eq!(ctrl.actuator().pwm().duty, 2000);
    }
}
