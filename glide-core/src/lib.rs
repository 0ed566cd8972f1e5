//! Board-agnostic core logic for the Glide servo firmware
//!
//! This crate contains everything that does not depend on specific
//! hardware:
//!
//! - Easing curves (ten families, in/out/in-out)
//! - Motion state machine and controller
//! - Actuator and clock traits
//! - Configuration types and the `servo.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod easing;
pub mod motion;
pub mod traits;
