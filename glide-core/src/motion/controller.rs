//! Motion controller
//!
//! Owns the motion state and the actuator, and forwards every computed
//! position to the actuator. The caller drives it by calling
//! [`MotionController::tick`] (or [`MotionController::update`]) once per
//! loop iteration; calls between update intervals are cheap no-ops.

use crate::config::{MotionConfig, Preset};
use crate::traits::{Actuator, Clock, PinId};

use super::state::{MotionState, TickOutcome};

/// Motion controller error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Configuration changed after the first applied update
    AlreadyStarted,
}

/// Eased position controller for a single actuator
pub struct MotionController<A> {
    actuator: A,
    config: MotionConfig,
    state: MotionState,
    started: bool,
}

impl<A: Actuator> MotionController<A> {
    /// Create a controller in its power-on state
    pub fn new(actuator: A, config: MotionConfig) -> Self {
        Self {
            actuator,
            state: MotionState::new(&config),
            config,
            started: false,
        }
    }

    /// Replace the configuration
    ///
    /// Only allowed before the first applied update. The state is rebuilt
    /// from the new configuration, so the target becomes its midpoint.
    pub fn configure(&mut self, config: MotionConfig) -> Result<(), MotionError> {
        if self.started {
            return Err(MotionError::AlreadyStarted);
        }
        self.state = MotionState::new(&config);
        self.config = config;
        Ok(())
    }

    /// Request a new end position
    ///
    /// The movement starts on the next applied update, from wherever the
    /// actuator is at that moment.
    pub fn set_target(&mut self, position: i32) {
        self.state.set_target(position);
    }

    /// Request one of the configured bounds as the end position
    pub fn move_to(&mut self, preset: Preset) {
        self.set_target(self.config.bounds.preset(preset));
    }

    /// Stop at the current position
    pub fn halt(&mut self) {
        self.set_target(self.state.current_position());
    }

    /// Attach the actuator output
    pub fn attach(&mut self, pin: PinId) {
        self.actuator.attach(pin);
    }

    /// Detach the actuator output
    ///
    /// Motion state keeps advancing; positions computed while detached are
    /// still written and the driver decides what to do with them.
    pub fn detach(&mut self) {
        self.actuator.detach();
    }

    /// Run one controller step at time `now_ms`
    ///
    /// Writes to the actuator only when a new position was computed.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        let outcome = self.state.tick(now_ms);
        if outcome.is_applied() {
            self.started = true;
        }
        if let TickOutcome::Moved(position) = outcome {
            self.actuator.write_microseconds(position);
        }
        outcome
    }

    /// Run one controller step at the clock's current time
    pub fn update(&mut self, clock: &impl Clock) -> TickOutcome {
        self.tick(clock.now_ms())
    }

    /// Last commanded position
    pub fn position(&self) -> i32 {
        self.state.current_position()
    }

    /// Requested end position
    pub fn target(&self) -> i32 {
        self.state.target_position()
    }

    /// Position the current movement started from
    pub fn start_position(&self) -> i32 {
        self.state.start_position()
    }

    /// Normalized progress of the current movement
    pub fn progress(&self) -> f32 {
        self.state.progress()
    }

    /// Check if a movement is running or pending
    pub fn is_moving(&self) -> bool {
        self.state.is_moving()
    }

    /// Active configuration
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Get access to the underlying actuator
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Get mutable access to the underlying actuator
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }
}
