//! Timed animations for programmatic panel moves.
//!
//! `show`/`hide` and keyboard displacement move the panel over a fixed
//! duration instead of simulating momentum. A [`Tween`] shares the frame
//! callback loop and the single-writer position cell with the flick engine.

use glide_core::{FrameCallbackRegistration, FrameClock, PositionCell, RuntimeHandle, Writer};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Easing curves, named after their Material counterparts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    LinearEasing,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowInEasing,
    LinearOutSlowInEasing,
    FastOutLinearEasing,
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        let (x1, y1, x2, y2) = match self {
            Easing::LinearEasing => return fraction.clamp(0.0, 1.0),
            Easing::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Easing::FastOutSlowInEasing => (0.4, 0.0, 0.2, 1.0),
            Easing::LinearOutSlowInEasing => (0.0, 0.0, 0.2, 1.0),
            Easing::FastOutLinearEasing => (0.4, 0.0, 1.0, 1.0),
        };
        CubicBezier::new(x1, y1, x2, y2).y_for_x(fraction)
    }
}

/// Unit cubic bezier through `(0, 0)` and `(1, 1)` in polynomial form.
struct CubicBezier {
    ax: f32,
    bx: f32,
    cx: f32,
    ay: f32,
    by: f32,
    cy: f32,
}

impl CubicBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    fn x_at(&self, t: f32) -> f32 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn y_at(&self, t: f32) -> f32 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn dx_at(&self, t: f32) -> f32 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    fn y_for_x(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.y_at(self.solve_t(x))
    }

    /// Newton-Raphson first, bisection when the slope flattens out.
    fn solve_t(&self, x: f32) -> f32 {
        const EPSILON: f32 = 1e-6;

        let mut t = x;
        for _ in 0..8 {
            let error = self.x_at(t) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = self.dx_at(t);
            if slope.abs() < EPSILON {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        let (mut low, mut high) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..16 {
            let error = self.x_at(t) - x;
            if error.abs() < EPSILON {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
        t
    }
}

/// Duration, easing and start delay of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl TweenSpec {
    /// Duration of programmatic show/hide moves.
    pub const DEFAULT_DURATION_MILLIS: u64 = 260;

    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    /// Eased fraction of the way to the target `elapsed_ms` after start.
    pub fn fraction_at(&self, elapsed_ms: f32) -> f32 {
        let active_ms = elapsed_ms - self.delay_millis as f32;
        if active_ms <= 0.0 {
            return 0.0;
        }
        if self.duration_millis == 0 {
            return 1.0;
        }
        let linear = (active_ms / self.duration_millis as f32).min(1.0);
        self.easing.transform(linear)
    }

    fn is_finished_at(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= (self.delay_millis + self.duration_millis) as f32
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::tween(Self::DEFAULT_DURATION_MILLIS, Easing::FastOutSlowInEasing)
    }
}

/// How a tween ended, with the value it left the position at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenOutcome {
    Completed(f32),
    Cancelled(f32),
}

impl TweenOutcome {
    pub fn value(&self) -> f32 {
        match self {
            TweenOutcome::Completed(value) | TweenOutcome::Cancelled(value) => *value,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TweenOutcome::Completed(_))
    }
}

type TweenEndCallback = Box<dyn FnOnce(TweenOutcome)>;

struct TweenState {
    session: u64,
    from: f32,
    to: f32,
    spec: TweenSpec,
    start_time_nanos: u64,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<TweenEndCallback>,
}

struct TweenInner {
    next_session: u64,
    state: Option<TweenState>,
}

/// Animates a [`PositionCell`] to a fixed value over time.
///
/// Cloning yields another handle to the same tween.
#[derive(Clone)]
pub struct Tween {
    inner: Rc<RefCell<TweenInner>>,
    position: PositionCell,
    frame_clock: FrameClock,
}

impl Tween {
    pub fn new(position: PositionCell, runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TweenInner {
                next_session: 1,
                state: None,
            })),
            position,
            frame_clock: runtime.frame_clock(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().state.is_some()
    }

    /// Target of the running tween, if any.
    pub fn target(&self) -> Option<f32> {
        self.inner.borrow().state.as_ref().map(|state| state.to)
    }

    /// Animates from the current value to `target`.
    ///
    /// A running tween is cancelled first. `on_end` fires exactly once,
    /// synchronously when the move has nothing to animate.
    pub fn animate_to(
        &self,
        target: f32,
        spec: TweenSpec,
        on_end: impl FnOnce(TweenOutcome) + 'static,
    ) {
        self.cancel();

        let from = self.position.get();
        if !target.is_finite() {
            log::warn!("ignoring tween to non-finite target {target}");
            on_end(TweenOutcome::Cancelled(from));
            return;
        }
        if from == target {
            on_end(TweenOutcome::Completed(from));
            return;
        }

        self.position.acquire(Writer::Tween);
        if spec.duration_millis == 0 && spec.delay_millis == 0 {
            self.position.set(Writer::Tween, target);
            self.position.release(Writer::Tween);
            on_end(TweenOutcome::Completed(target));
            return;
        }

        let session = {
            let mut inner = self.inner.borrow_mut();
            let session = inner.next_session;
            inner.next_session += 1;
            inner.state = Some(TweenState {
                session,
                from,
                to: target,
                spec,
                start_time_nanos: self.frame_clock.now_nanos(),
                registration: None,
                on_end: Some(Box::new(on_end)),
            });
            session
        };
        log::debug!(
            "tween start: {from} -> {target} over {}ms (+{}ms delay)",
            spec.duration_millis,
            spec.delay_millis
        );
        self.schedule_next_frame(session);
    }

    /// Stops the running tween where it is. No-op while idle.
    pub fn cancel(&self) {
        let Some(state) = self.inner.borrow_mut().state.take() else {
            return;
        };
        self.finish(state, false);
    }

    fn schedule_next_frame(&self, session: u64) {
        let tween = self.clone();
        let registration = self
            .frame_clock
            .with_frame_nanos(move |_| tween.on_frame(session));
        let mut inner = self.inner.borrow_mut();
        match inner.state.as_mut() {
            Some(state) if state.session == session => state.registration = Some(registration),
            _ => drop(registration),
        }
    }

    fn on_frame(&self, session: u64) {
        let (value, finished) = {
            let mut inner = self.inner.borrow_mut();
            let Some(state) = inner.state.as_mut() else {
                return;
            };
            if state.session != session {
                return;
            }
            state.registration = None;
            let elapsed_ms = self.frame_clock.elapsed_millis(state.start_time_nanos);
            if state.spec.is_finished_at(elapsed_ms) {
                (state.to, true)
            } else {
                let fraction = state.spec.fraction_at(elapsed_ms);
                (state.from + (state.to - state.from) * fraction, false)
            }
        };

        log::trace!("tween step: value {value}");
        self.position.set(Writer::Tween, value);

        let still_running = self
            .inner
            .borrow()
            .state
            .as_ref()
            .is_some_and(|state| state.session == session);
        if !still_running {
            return;
        }
        if finished {
            let state = self.inner.borrow_mut().state.take();
            if let Some(state) = state {
                self.finish(state, true);
            }
        } else {
            self.schedule_next_frame(session);
        }
    }

    fn finish(&self, mut state: TweenState, completed: bool) {
        drop(state.registration.take());
        self.position.release(Writer::Tween);
        let value = self.position.get();
        let outcome = if completed {
            TweenOutcome::Completed(value)
        } else {
            TweenOutcome::Cancelled(value)
        };
        log::debug!("tween end: {outcome:?} (target {})", state.to);
        if let Some(callback) = state.on_end.take() {
            callback(outcome);
        }
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Tween")
            .field("running", &inner.state.is_some())
            .field("target", &inner.state.as_ref().map(|state| state.to))
            .field("value", &self.position.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/tween_tests.rs"]
mod tests;
