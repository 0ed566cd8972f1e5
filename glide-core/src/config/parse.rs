//! Minimal TOML parser for servo configuration
//!
//! Handles only the subset needed for `servo.toml`. It does NOT support
//! the full TOML grammar, and it needs no allocator.
//!
//! Supported features:
//! - `[servo]`, `[motion]` and `[sequence]` section headers
//! - Key = value pairs (integer, float, quoted string)
//! - Single-line integer arrays: `waypoints = [550, 2400]`
//! - Comments (# ...)
//!
//! Example:
//!
//! ```toml
//! [servo]
//! pin = 14
//! min_us = 550
//! max_us = 2400
//! mid_us = 1500
//!
//! [motion]
//! interval_ms = 5
//! curve = "cubic"     # or the numeric id, 1
//! style = "out"       # or the motion code, 0
//! step = 0.005
//!
//! [sequence]
//! waypoints = [550, 2400, 1500]
//! dwell_ms = 1000
//! ```

use crate::easing::{Curve, Style};
use crate::traits::PinId;

use super::types::MachineConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor a key = value pair
    InvalidLine,
    /// Key not recognized in the current section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Servo,
    Motion,
    Sequence,
}

/// Parse TOML configuration into MachineConfig
///
/// Keys that are not present keep their default values.
pub fn parse_config(input: &str) -> Result<MachineConfig, ParseError> {
    let mut config = MachineConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Remove a trailing comment, ignoring `#` inside quoted strings
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "servo" => Ok(Section::Servo),
        "motion" => Ok(Section::Motion),
        "sequence" => Ok(Section::Sequence),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MachineConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => Err(ParseError::UnknownKey),
        Section::Servo => {
            let servo = &mut config.servo;
            match key {
                "pin" => servo.pin = PinId(parse_int(value)?),
                "min_us" => servo.motion.bounds.min_us = parse_int(value)?,
                "max_us" => servo.motion.bounds.max_us = parse_int(value)?,
                "mid_us" => servo.motion.bounds.mid_us = parse_int(value)?,
                "initial_us" => servo.motion.initial_position = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
            Ok(())
        }
        Section::Motion => {
            let motion = &mut config.servo.motion;
            match key {
                "interval_ms" => motion.update_interval_ms = parse_int(value)?,
                "curve" => motion.curve = parse_curve(value)?,
                "style" => motion.style = parse_style(value)?,
                "step" => motion.progress_step = parse_step(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
            Ok(())
        }
        Section::Sequence => {
            let sequence = &mut config.sequence;
            match key {
                "waypoints" => {
                    sequence.waypoints.clear();
                    for item in parse_array(value)? {
                        let item = item.trim();
                        // Allow a trailing comma
                        if item.is_empty() {
                            continue;
                        }
                        sequence
                            .waypoints
                            .push(parse_int(item)?)
                            .map_err(|_| ParseError::TooManyItems)?;
                    }
                }
                "dwell_ms" => sequence.dwell_ms = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
            Ok(())
        }
    }
}

fn parse_int<T: TryFrom<i64>>(value: &str) -> Result<T, ParseError> {
    let raw: i64 = strip_separators(value)
        .parse()
        .map_err(|_| ParseError::InvalidValue)?;
    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

fn parse_string(value: &str) -> Option<&str> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
}

fn parse_array(value: &str) -> Result<core::str::Split<'_, char>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;
    Ok(inner.split(','))
}

/// Curve by quoted name or numeric identifier
fn parse_curve(value: &str) -> Result<Curve, ParseError> {
    match parse_string(value) {
        Some(name) => name.parse().map_err(|_| ParseError::InvalidValue),
        None => Curve::try_from(parse_int::<u8>(value)?).map_err(|_| ParseError::InvalidValue),
    }
}

/// Style by quoted name or numeric motion code
fn parse_style(value: &str) -> Result<Style, ParseError> {
    match parse_string(value) {
        Some(name) => name.parse().map_err(|_| ParseError::InvalidValue),
        None => Style::try_from(parse_int::<u8>(value)?).map_err(|_| ParseError::InvalidValue),
    }
}

/// Progress step: a finite value in (0, 1]
fn parse_step(value: &str) -> Result<f32, ParseError> {
    let step: f32 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    if !step.is_finite() || step <= 0.0 || step > 1.0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(step)
}

/// Drop `_` digit separators from an integer literal
///
/// Literals longer than the buffer come back empty and fail to parse.
fn strip_separators(value: &str) -> heapless::String<24> {
    let mut out = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        if out.push(c).is_err() {
            out.clear();
            break;
        }
    }
    out
}
