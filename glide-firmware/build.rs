//! Build script for glide-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates servo.toml at compile time, with both the `toml` crate and
//!   the runtime parser from glide-core

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Curve names accepted by the runtime parser
const CURVES: &[&str] = &[
    "quadratic",
    "cubic",
    "quartic",
    "quintic",
    "sine",
    "circular",
    "exponential",
    "elastic",
    "overshoot",
    "back",
    "bounce",
];

/// Style names accepted by the runtime parser
const STYLES: &[&str] = &["in", "out", "in-out", "in_out", "inout"];

/// Waypoint capacity of the runtime config
const MAX_WAYPOINTS: usize = 8;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Linker scripts only apply to the embedded target
    let target = env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumb") {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
        if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
            println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
        }
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate servo.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=servo.toml");

    let config_path = Path::new("servo.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: servo.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a servo.toml configuration file.          ║\n\
            ║  Please create one in the glide-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read servo.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in servo.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_runtime_parse(&config_content, &mut errors);
    validate_sections(&config, &mut errors);
    validate_servo(&config, &mut errors);
    validate_motion(&config, &mut errors);
    validate_sequence(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid servo configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=servo.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The firmware falls back to defaults on any parse error, so reject here
fn validate_runtime_parse(content: &str, errors: &mut Vec<String>) {
    if let Err(e) = glide_core::config::parse_config(content) {
        errors.push(format!("firmware parser rejects this file: {:?}", e));
        errors.push("(use double quotes, single-line arrays, 32-bit integers)".to_string());
    }
}

/// Only the sections the runtime parser understands are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        if !["servo", "motion", "sequence"].contains(&name.as_str()) {
            errors.push(format!("unknown section or key '{}'", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    config.get(name).and_then(|s| s.as_table())
}

fn check_keys(table: &toml::value::Table, name: &str, known: &[&str], errors: &mut Vec<String>) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", name, key));
        }
    }
}

fn validate_servo(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(servo) = section(config, "servo") else {
        return;
    };
    check_keys(
        servo,
        "servo",
        &["pin", "min_us", "max_us", "mid_us", "initial_us"],
        errors,
    );

    if let Some(pin) = servo.get("pin") {
        match pin.as_integer() {
            Some(p) if (0..=29).contains(&p) => {}
            _ => errors.push("[servo] pin must be a GPIO number 0-29".to_string()),
        }
    }

    let mut bounds = Vec::new();
    for key in ["min_us", "max_us", "mid_us", "initial_us"] {
        if let Some(value) = servo.get(key) {
            match value.as_integer() {
                Some(us) if (0..=20_000).contains(&us) => bounds.push((key, us)),
                _ => errors.push(format!("[servo] {} must be 0-20000", key)),
            }
        }
    }

    let get = |key: &str| bounds.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
    if let (Some(min), Some(max)) = (get("min_us"), get("max_us")) {
        if min > max {
            // Accepted at runtime, but almost certainly a mistake
            println!("cargo:warning=servo.toml: min_us ({}) > max_us ({})", min, max);
        }
    }
}

fn validate_motion(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(motion) = section(config, "motion") else {
        return;
    };
    check_keys(
        motion,
        "motion",
        &["interval_ms", "curve", "style", "step"],
        errors,
    );

    if let Some(interval) = motion.get("interval_ms") {
        match interval.as_integer() {
            Some(ms) if ms >= 0 && ms <= u32::MAX as i64 => {}
            _ => errors.push("[motion] interval_ms must be a non-negative integer".to_string()),
        }
    }

    match motion.get("curve") {
        Some(toml::Value::String(name)) => {
            if !CURVES.contains(&name.to_ascii_lowercase().as_str()) {
                errors.push(format!("[motion] unknown curve '{}'", name));
            }
        }
        Some(toml::Value::Integer(id)) => {
            if !(1..=10).contains(id) {
                errors.push("[motion] curve id must be 1-10".to_string());
            }
        }
        Some(_) => errors.push("[motion] curve must be a name or id".to_string()),
        None => {}
    }

    match motion.get("style") {
        Some(toml::Value::String(name)) => {
            if !STYLES.contains(&name.to_ascii_lowercase().as_str()) {
                errors.push(format!("[motion] unknown style '{}'", name));
            }
        }
        Some(toml::Value::Integer(code)) => {
            if !(0..=2).contains(code) {
                errors.push("[motion] style code must be 0-2".to_string());
            }
        }
        Some(_) => errors.push("[motion] style must be a name or code".to_string()),
        None => {}
    }

    if let Some(step) = motion.get("step") {
        match step.as_float().or_else(|| step.as_integer().map(|i| i as f64)) {
            Some(s) if s > 0.0 && s <= 1.0 => {}
            _ => errors.push("[motion] step must be a float in (0, 1]".to_string()),
        }
    }
}

fn validate_sequence(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(sequence) = section(config, "sequence") else {
        return;
    };
    check_keys(sequence, "sequence", &["waypoints", "dwell_ms"], errors);

    match sequence.get("waypoints") {
        Some(toml::Value::Array(points)) => {
            if points.len() > MAX_WAYPOINTS {
                errors.push(format!(
                    "[sequence] at most {} waypoints are supported",
                    MAX_WAYPOINTS
                ));
            }
            if points.iter().any(|p| p.as_integer().is_none()) {
                errors.push("[sequence] waypoints must be integers".to_string());
            }
        }
        Some(_) => errors.push("[sequence] waypoints must be an array".to_string()),
        None => {}
    }

    if let Some(dwell) = sequence.get("dwell_ms") {
        match dwell.as_integer() {
            Some(ms) if ms >= 0 && ms <= u32::MAX as i64 => {}
            _ => errors.push("[sequence] dwell_ms must be a non-negative integer".to_string()),
        }
    }
}
