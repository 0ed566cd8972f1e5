//! Configuration types
//!
//! Construction-time servo and motion parameters, plus the parser for the
//! `servo.toml` file embedded in the firmware.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
