//! Easing curves
//!
//! Pure, stateless functions mapping normalized progress in [0, 1] to a
//! normalized position. Ten curve families, each with ease-in, ease-out
//! and ease-in-out variants.

pub mod curve;
pub mod functions;

pub use curve::{ease, Curve, EaseFn, SelectError, Style};
