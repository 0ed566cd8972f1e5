//! Eased motion state machine
//!
//! [`MotionState`] tracks one movement at a time: where it started, where
//! it is going and how far along it is. Each applied update adds a fixed
//! progress step and maps the result through the configured easing curve.
//!
//! Duration is therefore `update_interval_ms × (1 / progress_step)` for
//! every movement, whatever its distance.

use libm::roundf;

use crate::config::MotionConfig;
use crate::easing::{Curve, Style};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Less than one update interval since the last applied update
    Throttled,
    /// The current movement is complete; nothing to do
    Idle,
    /// Movement in progress, but start and target coincide
    InPlace,
    /// A new position was computed and should be sent to the actuator
    Moved(i32),
}

impl TickOutcome {
    /// Position to write, if any
    pub fn position(self) -> Option<i32> {
        match self {
            TickOutcome::Moved(pos) => Some(pos),
            _ => None,
        }
    }

    /// Check if the update was applied (not throttled)
    pub fn is_applied(self) -> bool {
        self != TickOutcome::Throttled
    }
}

/// Mutable motion state
///
/// Invariants:
/// - `progress` only increases within a movement and resets to 0 exactly
///   when a new target is detected
/// - `start_position` and `previous_target` change together, once per
///   detected target change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Last commanded position (µs)
    current_position: i32,
    /// Position captured when the current movement began
    start_position: i32,
    /// Caller-requested end position
    target_position: i32,
    /// Target for which the current movement was started
    previous_target: i32,
    /// Normalized elapsed fraction of the current movement
    progress: f32,
    /// Progress added per applied update
    progress_step: f32,
    /// Timestamp of the last applied update (ms)
    last_tick_ms: u64,
    /// Minimum time between applied updates (ms)
    update_interval_ms: u64,
    /// Easing curve family
    curve: Curve,
    /// Easing style
    style: Style,
}

impl MotionState {
    /// Create the power-on state for a configuration
    ///
    /// The actuator is assumed to sit at `initial_position` and the target
    /// is the midpoint of the bounds, so the first applied update starts a
    /// move to the midpoint unless the caller retargets first.
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            current_position: config.initial_position,
            start_position: config.initial_position,
            target_position: config.bounds.mid_us,
            previous_target: config.initial_position,
            progress: 0.0,
            progress_step: config.progress_step,
            last_tick_ms: 0,
            update_interval_ms: config.update_interval_ms as u64,
            curve: config.curve,
            style: config.style,
        }
    }

    /// Set the requested end position
    ///
    /// Detection happens on the next applied update; progress is not reset
    /// here.
    pub fn set_target(&mut self, position: i32) {
        self.target_position = position;
    }

    /// Run one step of the state machine at time `now_ms`
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if now_ms.saturating_sub(self.last_tick_ms) < self.update_interval_ms {
            return TickOutcome::Throttled;
        }
        self.last_tick_ms = now_ms;

        // New request, possibly mid-movement: restart from where we are now
        if self.target_position != self.previous_target {
            self.start_position = self.current_position;
            self.previous_target = self.target_position;
            self.progress = 0.0;

            #[cfg(feature = "defmt")]
            defmt::trace!(
                "Retarget {} -> {}",
                self.start_position,
                self.target_position
            );
        }

        if self.progress >= 1.0 {
            return TickOutcome::Idle;
        }

        self.progress += self.progress_step;

        if self.start_position == self.target_position {
            return TickOutcome::InPlace;
        }

        let eased = self.curve.evaluate(self.style, self.progress);
        let delta = self.target_position.abs_diff(self.start_position) as f32;
        let offset = roundf(eased * delta) as i32;

        self.current_position = if self.start_position < self.target_position {
            self.start_position + offset
        } else {
            self.start_position - offset
        };

        TickOutcome::Moved(self.current_position)
    }

    /// Last commanded position
    pub fn current_position(&self) -> i32 {
        self.current_position
    }

    /// Requested end position
    pub fn target_position(&self) -> i32 {
        self.target_position
    }

    /// Position the current movement started from
    pub fn start_position(&self) -> i32 {
        self.start_position
    }

    /// Normalized progress of the current movement
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Timestamp of the last applied update
    pub fn last_tick_ms(&self) -> u64 {
        self.last_tick_ms
    }

    /// Check if a movement is still running or a new target is pending
    pub fn is_moving(&self) -> bool {
        self.target_position != self.previous_target || self.progress < 1.0
    }

    /// Check if an update at `now_ms` would be throttled
    pub fn is_throttled(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_tick_ms) < self.update_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::functions::ease_out_cubic;

    fn state_at(start: i32, config: MotionConfig) -> MotionState {
        MotionState::new(&MotionConfig {
            initial_position: start,
            ..config
        })
    }

    /// Apply `n` updates spaced exactly one interval apart, starting after `now`
    fn run(state: &mut MotionState, now: &mut u64, n: usize) -> usize {
        let mut moves = 0;
        for _ in 0..n {
            *now += 5;
            if let TickOutcome::Moved(_) = state.tick(*now) {
                moves += 1;
            }
        }
        moves
    }

    #[test]
    fn test_power_on_state() {
        let state = MotionState::new(&MotionConfig::default());

        assert_eq!(state.current_position(), 1000);
        assert_eq!(state.target_position(), 1500);
        assert_eq!(state.progress(), 0.0);
        // Target differs from the initial position: a move to mid is pending
        assert!(state.is_moving());
    }

    #[test]
    fn test_first_move_goes_to_mid() {
        let mut state = MotionState::new(&MotionConfig::default());
        let mut now = 0;

        run(&mut state, &mut now, 210);
        assert_eq!(state.current_position(), 1500);
        assert!(!state.is_moving());
    }

    #[test]
    fn test_cubic_out_end_to_end() {
        let mut state = state_at(1000, MotionConfig::default());
        state.set_target(2000);
        let mut now = 0;

        run(&mut state, &mut now, 100);
        let progress = state.progress();
        assert!((progress - 0.5).abs() < 1e-4);
        let expected = 1000 + roundf(ease_out_cubic(progress) * 1000.0) as i32;
        assert_eq!(state.current_position(), expected);
        assert_eq!(state.current_position(), 1875);

        run(&mut state, &mut now, 110);
        assert!(state.progress() >= 1.0);
        assert_eq!(state.current_position(), 2000);
        assert!(!state.is_moving());
    }

    #[test]
    fn test_descending_mirrors_ascending() {
        let mut state = state_at(2000, MotionConfig::default());
        state.set_target(1000);
        let mut now = 0;

        run(&mut state, &mut now, 100);
        assert_eq!(state.current_position(), 1125);

        run(&mut state, &mut now, 110);
        assert_eq!(state.current_position(), 1000);
    }

    #[test]
    fn test_interval_gate() {
        let mut state = state_at(1000, MotionConfig::default());
        state.set_target(2000);

        assert_eq!(state.tick(5), TickOutcome::Moved(1015));
        let after_first = state;

        // Deltas below the interval change nothing
        assert_eq!(state.tick(6), TickOutcome::Throttled);
        assert_eq!(state.tick(9), TickOutcome::Throttled);
        assert_eq!(state, after_first);

        // Exactly one interval later the update applies
        assert!(state.tick(10).is_applied());
        assert_eq!(state.last_tick_ms(), 10);
    }

    #[test]
    fn test_first_tick_inside_interval_is_throttled() {
        let mut state = state_at(1000, MotionConfig::default());
        state.set_target(2000);

        assert!(state.is_throttled(4));
        assert_eq!(state.tick(4), TickOutcome::Throttled);
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_idle_after_completion_is_stable() {
        let mut state = state_at(1000, MotionConfig::default());
        state.set_target(1200);
        let mut now = 0;
        run(&mut state, &mut now, 210);

        let settled = state.current_position();
        for _ in 0..50 {
            now += 5;
            assert_eq!(state.tick(now), TickOutcome::Idle);
            assert_eq!(state.current_position(), settled);
        }
    }

    #[test]
    fn test_retarget_mid_motion_restarts_from_current() {
        let mut state = state_at(1000, MotionConfig::default());
        state.set_target(2000);
        let mut now = 0;
        run(&mut state, &mut now, 100);

        let partway = state.current_position();
        assert_eq!(partway, 1875);

        state.set_target(1200);
        // Setting the target alone does not touch progress
        assert!(state.progress() > 0.49);

        now += 5;
        let outcome = state.tick(now);
        assert_eq!(state.start_position(), partway);
        assert!((state.progress() - 0.005).abs() < 1e-6);

        // First step of the new, descending move
        let offset = roundf(ease_out_cubic(state.progress()) * 675.0) as i32;
        assert_eq!(outcome, TickOutcome::Moved(partway - offset));

        run(&mut state, &mut now, 210);
        assert_eq!(state.current_position(), 1200);
    }

    #[test]
    fn test_target_equal_to_current_never_moves() {
        let mut state = state_at(1000, MotionConfig::default());
        state.set_target(1000 + 1);
        let mut now = 0;
        run(&mut state, &mut now, 210);
        assert_eq!(state.current_position(), 1001);

        state.set_target(state.current_position());
        // Unchanged target is not a new request
        assert_eq!(run(&mut state, &mut now, 300), 0);
    }

    #[test]
    fn test_in_place_movement_advances_without_moving() {
        // Power-on position already at the midpoint target
        let config = MotionConfig {
            initial_position: 1500,
            ..Default::default()
        };
        let mut state = MotionState::new(&config);
        let mut now = 5;

        assert_eq!(state.tick(now), TickOutcome::InPlace);
        assert!((state.progress() - 0.005).abs() < 1e-6);

        assert_eq!(run(&mut state, &mut now, 300), 0);
        assert_eq!(state.current_position(), 1500);
        assert!(!state.is_moving());
    }

    #[test]
    fn test_halt_by_retargeting_current_position() {
        let mut state = state_at(1000, MotionConfig::default());
        state.set_target(2000);
        let mut now = 0;
        run(&mut state, &mut now, 50);

        let stopped_at = state.current_position();
        state.set_target(stopped_at);

        now += 5;
        assert_eq!(state.tick(now), TickOutcome::InPlace);
        assert_eq!(run(&mut state, &mut now, 300), 0);
        assert_eq!(state.current_position(), stopped_at);
    }

    #[test]
    fn test_overshoot_passes_target() {
        let config = MotionConfig {
            curve: Curve::Overshoot,
            style: Style::Out,
            ..Default::default()
        };
        let mut state = state_at(1000, config);
        state.set_target(2000);

        let mut now = 0;
        let mut peak = 0;
        for _ in 0..210 {
            now += 5;
            if let Some(pos) = state.tick(now).position() {
                peak = peak.max(pos);
            }
        }

        assert!(peak > 2000, "back-out should overshoot, peak {}", peak);
        assert_eq!(state.current_position(), 2000);
    }

    #[test]
    fn test_final_update_overruns_unit_progress() {
        let config = MotionConfig {
            style: Style::In,
            ..Default::default()
        };
        let mut state = state_at(1000, config);
        state.set_target(2400);
        let mut now = 0;

        let mut last = None;
        for _ in 0..210 {
            now += 5;
            if let TickOutcome::Moved(pos) = state.tick(now) {
                last = Some(pos);
            }
        }

        // Accumulated steps stop just past 1 and the curve is evaluated there
        assert!((state.progress() - 1.005).abs() < 1e-4);
        assert_eq!(last, Some(2421));
        assert_eq!(state.current_position(), 2421);
        assert_eq!(state.target_position(), 2400);
        assert!(!state.is_moving());

        // Resting past the target is stable
        now += 5;
        assert_eq!(state.tick(now), TickOutcome::Idle);
        assert_eq!(state.current_position(), 2421);
    }

    #[test]
    fn test_fixed_cadence_ignores_late_ticks() {
        let mut state = state_at(1000, MotionConfig::default());
        state.set_target(2000);

        // A tick 100ms late still advances by a single step
        state.tick(100);
        assert!((state.progress() - 0.005).abs() < 1e-6);
    }
}
