//! Platform abstraction traits for the Glide runtime.
//!
//! These traits let the host platform drive frames and provide time
//! without the runtime depending directly on `std::time` or a windowing
//! system. Tests plug in a manual clock to get deterministic motion.

/// Schedules frames for the runtime.
///
/// Implementations must be safe to call from any thread: a platform event
/// loop may want to wake the UI thread when a frame is requested.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host produce a new display frame.
    fn schedule_frame(&self);
}

/// Monotonic time source.
pub trait Clock: Send + Sync {
    /// Nanoseconds elapsed since an arbitrary, fixed origin.
    fn now_nanos(&self) -> u64;

    /// Milliseconds elapsed since `since_nanos`, saturating at zero.
    fn elapsed_millis(&self, since_nanos: u64) -> f32 {
        self.now_nanos().saturating_sub(since_nanos) as f32 / 1_000_000.0
    }
}
