//! Motion simulations for Glide panels: exponential-decay flicks and timed
//! tweens, both driven by the runtime's frame callbacks.

pub mod decay_spec;
pub mod flick;
pub mod tween;

pub use decay_spec::ExponentialDecaySpec;
pub use flick::{FlickConfig, FlickEngine};
pub use tween::{Easing, Tween, TweenOutcome, TweenSpec};
