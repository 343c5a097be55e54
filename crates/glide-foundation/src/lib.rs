//! Gesture handling for Glide panels.
//!
//! [`GestureArbiter`] decides whether a drag belongs to the panel and maps it
//! to positions; [`GestureTracker`] digests raw pointer events into
//! [`GestureSample`]s; [`AnchorSet`] picks where a released panel settles.

pub mod anchors;
pub mod arbiter;
pub mod gesture_constants;
pub mod sample;
pub mod tracker;
pub mod velocity_tracker;

pub use anchors::{closest, AnchorSet};
pub use arbiter::{DragSession, GestureArbiter, MomentumDriver};
pub use sample::GestureSample;
pub use tracker::{GestureTracker, PointerEventKind, PointerInput};
pub use velocity_tracker::VelocityTracker1D;
