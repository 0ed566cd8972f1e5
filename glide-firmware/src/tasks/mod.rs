//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod easer;
pub mod sequence;

pub use easer::{easer_task, EaserServo};
pub use sequence::sequence_task;
