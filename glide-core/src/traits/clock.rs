//! Monotonic clock trait

/// Source of monotonic time in milliseconds
///
/// Values must never decrease. The resolution should be at least as fine
/// as the controller's update interval.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin (typically boot)
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
