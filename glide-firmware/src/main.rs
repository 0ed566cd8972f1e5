//! Glide - Eased Servo Motion Firmware
//!
//! Main firmware binary for RP2040-based boards. Drives one hobby servo
//! through a configured waypoint sequence, easing every movement along the
//! curve selected in `servo.toml`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

use glide_core::config::{parse_config, MachineConfig};
use glide_drivers::servo::{PwmServo, PwmServoConfig};

use crate::servo_pwm::RpServoPwm;

/// Embedded configuration (compiled into firmware)
/// Edit servo.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../servo.toml");

mod channels;
mod clock;
mod servo_pwm;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Glide firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    let servo_config = config.servo;
    let waypoints = config.effective_waypoints();
    for point in config.waypoints_outside_bounds() {
        warn!(
            "Waypoint {} us outside bounds {}..{} us",
            point, servo_config.motion.bounds.min_us, servo_config.motion.bounds.max_us
        );
    }

    // Servo signal on GPIO14 (PWM slice 7, channel A)
    if servo_config.pin.0 != 14 {
        warn!(
            "servo.toml pin {} is not wired on this board, using GPIO14",
            servo_config.pin.0
        );
    }
    let driver_config = PwmServoConfig::default();
    let pwm = Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, PwmConfig::default());
    let pwm = RpServoPwm::new(pwm, driver_config.frame_period_us);
    let servo: tasks::EaserServo = PwmServo::new(pwm, driver_config);

    info!("Servo PWM initialized");

    // Spawn tasks
    spawner
        .spawn(tasks::easer_task(servo, servo_config))
        .unwrap();
    spawner
        .spawn(tasks::sequence_task(waypoints, config.sequence.dwell_ms))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> MachineConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config loaded: bounds {}..{} us, mid {} us",
                config.servo.motion.bounds.min_us,
                config.servo.motion.bounds.max_us,
                config.servo.motion.bounds.mid_us
            );
            config
        }
        Err(e) => {
            warn!("Config parse failed: {:?}, using defaults", e);
            MachineConfig::default()
        }
    }
}
