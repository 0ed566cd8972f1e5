//! Actuator trait
//!
//! The output side of the motion controller: something that holds a
//! pulse-width position. Implementations wrap the PWM hardware that
//! produces the servo signal.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of the output pin an actuator is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinId(pub u8);

/// Pulse-position actuator (hobby servo or compatible)
///
/// Writes are fire-and-forget: the controller neither waits for nor
/// observes the result. A driver that can fail must absorb the failure
/// itself.
pub trait Actuator {
    /// Start driving the output on `pin`
    fn attach(&mut self, pin: PinId);

    /// Stop driving the output
    ///
    /// A detached servo is unpowered and may be moved by hand.
    fn detach(&mut self);

    /// Command a position as a pulse width in microseconds
    ///
    /// Called at most once per applied controller tick.
    fn write_microseconds(&mut self, pulse_us: i32);

    /// Check if the output is currently attached
    fn is_attached(&self) -> bool;
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn attach(&mut self, pin: PinId) {
        (**self).attach(pin)
    }

    fn detach(&mut self) {
        (**self).detach()
    }

    fn write_microseconds(&mut self, pulse_us: i32) {
        (**self).write_microseconds(pulse_us)
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }
}
