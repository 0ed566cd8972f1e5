//! Servo easing task
//!
//! Owns the motion controller and polls it every millisecond. The
//! controller's own update interval decides when the servo actually moves.

use defmt::*;
use embassy_time::{Duration, Ticker};

use glide_core::config::ServoConfig;
use glide_core::motion::{MotionController, TickOutcome};
use glide_drivers::servo::PwmServo;

use crate::channels::{ARRIVED, TARGET};
use crate::clock::EmbassyClock;
use crate::servo_pwm::RpServoPwm;

/// Poll period; finer than any useful update interval
const POLL_INTERVAL_MS: u64 = 1;

/// Servo type driven by the easer task
pub type EaserServo = PwmServo<RpServoPwm>;

/// Servo easing task
///
/// Takes new targets from [`TARGET`] and signals [`ARRIVED`] once the
/// movement toward them completes.
#[embassy_executor::task]
pub async fn easer_task(servo: EaserServo, config: ServoConfig) {
    info!(
        "Easer task started: {:?}/{:?}, {} ms per move",
        config.motion.curve,
        config.motion.style,
        config.motion.movement_duration_ms()
    );

    let clock = EmbassyClock;
    let mut ctrl = MotionController::new(servo, config.motion);
    ctrl.attach(config.pin);

    let mut moving = ctrl.is_moving();
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        if let Some(target) = TARGET.try_take() {
            debug!("Retarget: {} -> {} us", ctrl.position(), target);
            ctrl.set_target(target);
            moving = true;
        }

        match ctrl.update(&clock) {
            TickOutcome::Moved(position) => {
                trace!("Servo at {} us ({})", position, ctrl.progress());
            }
            TickOutcome::Idle if moving => {
                moving = false;
                // Overrunning curves may rest a few µs past the target
                info!("Arrived: target {} us, at {} us", ctrl.target(), ctrl.position());
                ARRIVED.signal(ctrl.target());

                let faults = ctrl.actuator().fault_count();
                if faults > 0 {
                    warn!("{} servo output faults so far", faults);
                }
            }
            _ => {}
        }

        ticker.next().await;
    }
}
