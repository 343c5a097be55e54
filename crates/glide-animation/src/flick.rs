//! Flick animation driver for draggable panels.
//!
//! Drives an exponential decay from a release velocity using the runtime's
//! frame callbacks. Each frame the elapsed time since `start` is read from the
//! runtime clock, so uneven frame pacing does not distort the curve.

use crate::decay_spec::ExponentialDecaySpec;
use glide_core::{
    clamp_position, FrameCallbackRegistration, FrameClock, MotionConfig, PositionCell,
    RuntimeHandle, Subscription, Writer,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type MomentumEndCallback = Box<dyn FnOnce(f32)>;

/// Parameters of a single flick.
pub struct FlickConfig {
    /// Value the flick starts from (clamped into the engine bounds).
    pub from_value: f32,
    /// Release velocity along the gesture axis, in units per millisecond.
    pub velocity: f32,
    /// Damping factor in `(0, 1]`.
    pub friction: f32,
    /// Anchor the flick should settle on instead of a free stop.
    pub to_value: Option<f32>,
    /// Invoked once with the resting value when the flick halts or is stopped.
    pub on_momentum_end: Option<MomentumEndCallback>,
}

impl FlickConfig {
    pub fn new(from_value: f32, velocity: f32, friction: f32) -> Self {
        Self {
            from_value,
            velocity,
            friction,
            to_value: None,
            on_momentum_end: None,
        }
    }

    pub fn with_target(mut self, to_value: f32) -> Self {
        self.to_value = Some(to_value);
        self
    }

    pub fn on_momentum_end(mut self, callback: impl FnOnce(f32) + 'static) -> Self {
        self.on_momentum_end = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for FlickConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlickConfig")
            .field("from_value", &self.from_value)
            .field("velocity", &self.velocity)
            .field("friction", &self.friction)
            .field("to_value", &self.to_value)
            .finish()
    }
}

/// Why a flick stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlickHalt {
    /// The per-frame delta decayed below the threshold.
    Decayed,
    /// The value hit `min` or `max`.
    Rail,
    /// The value arrived at the requested target.
    Target,
    /// `stop` was called, or a new flick replaced this one.
    Interrupted,
}

/// State for an active flick.
struct FlickState {
    session: u64,
    value: f32,
    velocity: f32,
    friction: f32,
    to_value: Option<f32>,
    /// Clock time when `start` was called.
    start_time_nanos: u64,
    /// Pending frame callback; dropping it cancels the next step.
    registration: Option<FrameCallbackRegistration>,
    on_momentum_end: Option<MomentumEndCallback>,
    steps: u32,
}

struct FlickInner {
    min: f32,
    max: f32,
    spec: ExponentialDecaySpec,
    next_session: u64,
    state: Option<FlickState>,
}

enum Step {
    Continue,
    Halt(FlickHalt),
}

/// Exponential-decay motion engine.
///
/// Cloning yields another handle to the same engine. While running the
/// engine is the sole writer of its [`PositionCell`].
#[derive(Clone)]
pub struct FlickEngine {
    inner: Rc<RefCell<FlickInner>>,
    position: PositionCell,
    frame_clock: FrameClock,
}

impl FlickEngine {
    /// Creates an engine with its own position cell, resting at the bound
    /// closest to zero.
    pub fn new(min: f32, max: f32, runtime: RuntimeHandle) -> Self {
        let position = PositionCell::new(clamp_position(0.0, min, max));
        Self::with_position(position, min, max, runtime, &MotionConfig::default())
    }

    /// Creates an engine writing to a position cell owned by the host.
    pub fn with_position(
        position: PositionCell,
        min: f32,
        max: f32,
        runtime: RuntimeHandle,
        config: &MotionConfig,
    ) -> Self {
        debug_assert!(min <= max, "flick bounds inverted: [{min}, {max}]");
        Self {
            inner: Rc::new(RefCell::new(FlickInner {
                min,
                max,
                spec: ExponentialDecaySpec::from_config(config),
                next_session: 1,
                state: None,
            })),
            position,
            frame_clock: runtime.frame_clock(),
        }
    }

    pub fn position(&self) -> &PositionCell {
        &self.position
    }

    pub fn value(&self) -> f32 {
        self.position.get()
    }

    pub fn min(&self) -> f32 {
        self.inner.borrow().min
    }

    pub fn max(&self) -> f32 {
        self.inner.borrow().max
    }

    /// Target of the running flick, if it has one.
    pub fn target(&self) -> Option<f32> {
        self.inner
            .borrow()
            .state
            .as_ref()
            .and_then(|state| state.to_value)
    }

    /// Returns true if a flick is currently running.
    pub fn is_running(&self) -> bool {
        self.inner.borrow().state.is_some()
    }

    /// Registers a listener for every value the engine reports.
    pub fn on_update(&self, listener: impl Fn(f32) + 'static) -> Subscription {
        self.position.subscribe(listener)
    }

    /// Updates the lower bound; a running flick uses it from its next step.
    pub fn set_min(&self, min: f32) {
        let mut inner = self.inner.borrow_mut();
        debug_assert!(min <= inner.max, "flick min {min} above max {}", inner.max);
        inner.min = min;
    }

    /// Updates the upper bound; a running flick uses it from its next step.
    pub fn set_max(&self, max: f32) {
        let mut inner = self.inner.borrow_mut();
        debug_assert!(inner.min <= max, "flick max {max} below min {}", inner.min);
        inner.max = max;
    }

    /// Estimates where a free flick from `from_value` would land.
    pub fn predict_next_position(&self, from_value: f32, velocity: f32, friction: f32) -> f32 {
        self.inner
            .borrow()
            .spec
            .predict(from_value, velocity, friction)
    }

    /// Starts a flick, stopping any flick already running.
    pub fn start(&self, config: FlickConfig) {
        // Cancel any existing flick
        self.stop();

        let FlickConfig {
            from_value,
            velocity,
            friction,
            to_value,
            mut on_momentum_end,
        } = config;

        let motionless = !from_value.is_finite()
            || !ExponentialDecaySpec::is_moving(velocity, friction)
            || to_value.is_some_and(|target| !target.is_finite());
        if motionless {
            log::debug!(
                "flick ignored: from {from_value}, velocity {velocity}, friction {friction}, target {to_value:?}"
            );
            if let Some(callback) = on_momentum_end.take() {
                callback(self.position.get());
            }
            return;
        }

        let (session, start_value, target) = {
            let mut inner = self.inner.borrow_mut();
            let session = inner.next_session;
            inner.next_session += 1;
            let start_value = clamp_position(from_value, inner.min, inner.max);
            let target = to_value.map(|target| clamp_position(target, inner.min, inner.max));
            inner.state = Some(FlickState {
                session,
                value: start_value,
                velocity,
                friction,
                to_value: target,
                start_time_nanos: self.frame_clock.now_nanos(),
                registration: None,
                on_momentum_end,
                steps: 0,
            });
            (session, start_value, target)
        };

        log::debug!(
            "flick start: from {start_value}, velocity {velocity}, friction {friction}, target {target:?}"
        );
        self.position.acquire(Writer::Flick);
        self.position.set(Writer::Flick, start_value);
        self.schedule_next_frame(session);
    }

    /// Stops the running flick and reports its resting value.
    ///
    /// Idempotent: calling it while idle does nothing.
    pub fn stop(&self) {
        self.finish(FlickHalt::Interrupted);
    }

    fn schedule_next_frame(&self, session: u64) {
        let engine = self.clone();
        let registration = self.frame_clock.with_frame_nanos(move |_frame_time_nanos| {
            engine.on_frame(session);
        });
        let mut inner = self.inner.borrow_mut();
        match inner.state.as_mut() {
            Some(state) if state.session == session => state.registration = Some(registration),
            // The flick ended while the callback was being registered.
            _ => drop(registration),
        }
    }

    fn on_frame(&self, session: u64) {
        let (new_value, step) = {
            let mut inner = self.inner.borrow_mut();
            let (min, max, spec) = (inner.min, inner.max, inner.spec);
            let Some(state) = inner.state.as_mut() else {
                return;
            };
            if state.session != session {
                return;
            }
            state.registration = None;
            state.steps += 1;

            let elapsed_ms = self.frame_clock.elapsed_millis(state.start_time_nanos);
            let raw_delta = spec.delta_at(elapsed_ms, state.velocity, state.friction);

            match state.to_value {
                None if raw_delta.abs() < spec.min_delta() => {
                    (state.value, Step::Halt(FlickHalt::Decayed))
                }
                None => {
                    let value = clamp_position(state.value + raw_delta, min, max);
                    state.value = value;
                    let step = if value <= min || value >= max {
                        Step::Halt(FlickHalt::Rail)
                    } else {
                        Step::Continue
                    };
                    (value, step)
                }
                Some(target) => {
                    let target = clamp_position(target, min, max);
                    let delta = spec.homing_delta(raw_delta);
                    // Never overshoot the target in the direction of travel.
                    let (low, high) = if delta < 0.0 {
                        (target, max)
                    } else {
                        (min, target)
                    };
                    let value = clamp_position(state.value + delta, low, high);
                    state.value = value;
                    let step = if value <= min || value >= max {
                        Step::Halt(FlickHalt::Rail)
                    } else if value == target {
                        Step::Halt(FlickHalt::Target)
                    } else if delta == 0.0 {
                        // The decay term underflowed; nothing will move again.
                        Step::Halt(FlickHalt::Decayed)
                    } else {
                        Step::Continue
                    };
                    (value, step)
                }
            }
        };

        log::trace!("flick step: value {new_value}");
        self.position.set(Writer::Flick, new_value);

        match step {
            Step::Continue => {
                if self.is_session(session) {
                    self.schedule_next_frame(session);
                }
            }
            Step::Halt(reason) => {
                if self.is_session(session) {
                    self.finish(reason);
                }
            }
        }
    }

    fn is_session(&self, session: u64) -> bool {
        self.inner
            .borrow()
            .state
            .as_ref()
            .is_some_and(|state| state.session == session)
    }

    fn finish(&self, reason: FlickHalt) {
        let Some(mut state) = self.inner.borrow_mut().state.take() else {
            return;
        };
        // Dropping the registration cancels a pending step.
        drop(state.registration.take());
        self.position.release(Writer::Flick);

        let value = self.position.get();
        log::debug!(
            "flick halt ({reason:?}) at {value} after {} steps",
            state.steps
        );
        if let Some(callback) = state.on_momentum_end.take() {
            callback(value);
        }
    }
}

impl fmt::Debug for FlickEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FlickEngine")
            .field("min", &inner.min)
            .field("max", &inner.max)
            .field("running", &inner.state.is_some())
            .field("value", &self.position.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/flick_tests.rs"]
mod tests;
