//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in glide-core:
//!
//! - PWM hobby servo output over any `embedded-hal` PWM channel

#![no_std]
#![deny(unsafe_code)]

pub mod servo;
