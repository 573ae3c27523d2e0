//! Monotonic time base

/// Monotonic millisecond clock
///
/// The value only needs to be monotonic, not anchored to any epoch. The
/// driver measures elapsed time with wrapping subtraction.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed point
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since `start`
    fn elapsed_ms(&self, start: u64) -> u64 {
        self.now_ms().wrapping_sub(start)
    }
}
