#![doc = r"Core runtime pieces for Glide sliding panels."]

pub mod config;
pub mod frame_clock;
pub mod platform;
pub mod position;
pub mod range;
pub mod runtime;

pub use config::MotionConfig;
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler};
pub use position::{PositionCell, Subscription, Writer};
pub use range::{clamp_position, DraggableRange, RangeError};
pub use runtime::{DefaultScheduler, FrameCallbackId, Runtime, RuntimeHandle};

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod runtime_tests;

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;
