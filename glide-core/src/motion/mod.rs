//! Eased servo motion
//!
//! [`MotionState`] is the tick state machine; [`MotionController`] binds it
//! to an [`Actuator`](crate::traits::Actuator) and writes every computed
//! position.

pub mod controller;
pub mod state;

pub use controller::{MotionController, MotionError};
pub use state::{MotionState, TickOutcome};
