//! Configuration type definitions
//!
//! These types hold the construction-time parameters of a servo and its
//! motion controller. They are filled from `servo.toml` by
//! [`super::parse_config`] or built directly in code.

use heapless::Vec;

use crate::easing::{Curve, Style};
use crate::traits::PinId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum waypoints in a target sequence
pub const MAX_WAYPOINTS: usize = 8;

/// Default update interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u32 = 5;

/// Default progress increment per applied tick
pub const DEFAULT_PROGRESS_STEP: f32 = 0.005;

/// Default power-on pulse width assumed for the servo (µs)
pub const DEFAULT_INITIAL_US: i32 = 1000;

/// Named position within the servo bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Preset {
    Min,
    Mid,
    Max,
}

/// Servo pulse-width range in microseconds
///
/// Used for default positioning only. Targets are never clamped against
/// these values; a `min > max` configuration is accepted as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoBounds {
    /// Minimum rotation pulse width
    pub min_us: i32,
    /// Maximum rotation pulse width
    pub max_us: i32,
    /// Midpoint pulse width
    pub mid_us: i32,
}

impl Default for ServoBounds {
    fn default() -> Self {
        Self {
            min_us: 550,
            max_us: 2400,
            mid_us: 1500,
        }
    }
}

impl ServoBounds {
    /// Pulse width for a named position
    pub fn preset(&self, preset: Preset) -> i32 {
        match preset {
            Preset::Min => self.min_us,
            Preset::Mid => self.mid_us,
            Preset::Max => self.max_us,
        }
    }

    /// Check if a pulse width lies within `[min_us, max_us]`
    pub fn contains(&self, pulse_us: i32) -> bool {
        pulse_us >= self.min_us && pulse_us <= self.max_us
    }
}

/// Motion controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Minimum time between applied updates (ms)
    pub update_interval_ms: u32,
    /// Easing curve family
    pub curve: Curve,
    /// Easing style
    pub style: Style,
    /// Progress added per applied update
    pub progress_step: f32,
    /// Pulse width the servo is assumed to hold at power-on
    pub initial_position: i32,
    /// Servo range
    pub bounds: ServoBounds,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: DEFAULT_INTERVAL_MS,
            curve: Curve::Cubic,
            style: Style::Out,
            progress_step: DEFAULT_PROGRESS_STEP,
            initial_position: DEFAULT_INITIAL_US,
            bounds: ServoBounds::default(),
        }
    }
}

impl MotionConfig {
    /// Create a configuration from the classic positional parameters
    pub fn new(
        update_interval_ms: u32,
        curve: Curve,
        style: Style,
        min_us: i32,
        max_us: i32,
        mid_us: i32,
    ) -> Self {
        Self {
            update_interval_ms,
            curve,
            style,
            bounds: ServoBounds {
                min_us,
                max_us,
                mid_us,
            },
            ..Default::default()
        }
    }

    /// Number of applied updates a full movement takes
    pub fn updates_per_movement(&self) -> u32 {
        if self.progress_step <= 0.0 {
            return u32::MAX;
        }
        // Tolerate the representation error of steps like 0.005
        libm::ceilf(1.0 / self.progress_step - 1e-3) as u32
    }

    /// Nominal duration of one movement in milliseconds
    ///
    /// Duration is fixed by configuration; it does not depend on distance.
    pub fn movement_duration_ms(&self) -> u32 {
        self.updates_per_movement()
            .saturating_mul(self.update_interval_ms)
    }
}

/// Servo output configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoConfig {
    /// Signal pin
    pub pin: PinId,
    /// Motion parameters
    pub motion: MotionConfig,
}

/// Target sequence configuration
///
/// The firmware cycles through `waypoints`, holding each for `dwell_ms`
/// after the servo arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequenceConfig {
    /// Target pulse widths in order
    pub waypoints: Vec<i32, MAX_WAYPOINTS>,
    /// Hold time at each waypoint (ms)
    pub dwell_ms: u32,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            waypoints: Vec::new(),
            dwell_ms: 1000,
        }
    }
}

/// Complete configuration file contents
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    pub servo: ServoConfig,
    pub sequence: SequenceConfig,
}

impl MachineConfig {
    /// Create an empty configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Waypoints to run, falling back to min/max/mid when none are configured
    pub fn effective_waypoints(&self) -> Vec<i32, MAX_WAYPOINTS> {
        if !self.sequence.waypoints.is_empty() {
            return self.sequence.waypoints.clone();
        }

        let bounds = &self.servo.motion.bounds;
        [Preset::Min, Preset::Max, Preset::Mid]
            .into_iter()
            .map(|p| bounds.preset(p))
            .collect()
    }

    /// Configured waypoints that fall outside the servo bounds
    ///
    /// Such targets are still driven; this only reports them.
    pub fn waypoints_outside_bounds(&self) -> impl Iterator<Item = i32> + '_ {
        let bounds = self.servo.motion.bounds;
        self.sequence
            .waypoints
            .iter()
            .copied()
            .filter(move |&p| !bounds.contains(p))
    }
}
