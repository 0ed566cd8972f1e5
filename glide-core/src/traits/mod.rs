//! Hardware abstraction traits
//!
//! These traits define the interface between the motion logic and the
//! board: the servo output and the time source.

pub mod actuator;
pub mod clock;

pub use actuator::{Actuator, PinId};
pub use clock::Clock;
