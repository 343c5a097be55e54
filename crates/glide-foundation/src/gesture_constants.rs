//! Shared gesture constants for pointer tracking.
//!
//! Values are in device-independent units. Drag and velocity activation
//! thresholds for the panel itself live in `MotionConfig`, since hosts tune
//! them per panel.

/// Maximum release speed in units per second.
///
/// Matches Android's default maximum fling velocity on a baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Milliseconds per second, for converting tracker output to the per
/// millisecond velocities the panel works in.
pub const MILLIS_PER_SECOND: f32 = 1_000.0;
