//! Gesture capture and drag-to-position mapping.
//!
//! The arbiter is the only place that knows about screen-axis signs: a
//! finger moving down the screen (`dy > 0`) makes the panel less open, so
//! the dragged position is `origin - dy`.

use crate::sample::GestureSample;
use glide_core::{DraggableRange, MotionConfig, PositionCell, Writer};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Interface through which the arbiter controls post-release motion.
///
/// Implemented by whatever owns the flick simulation, the same way a
/// scroll gesture reaches its state holder through a trait.
pub trait MomentumDriver {
    /// Stops any running motion so the drag can take over the position.
    fn stop_momentum(&self);

    /// Starts momentum from `from_value` with the release velocity along the
    /// gesture's screen axis, in units per millisecond.
    fn start_momentum(&self, from_value: f32, velocity: f32);
}

/// Bookkeeping for a captured gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Position when the gesture was granted; moves are relative to it.
    pub start_position: f32,
}

type DragCallback = Rc<dyn Fn(f32)>;

/// Decides gesture capture and turns drag samples into positions.
pub struct GestureArbiter {
    position: PositionCell,
    momentum: Rc<dyn MomentumDriver>,
    range: Cell<DraggableRange>,
    config: Cell<MotionConfig>,
    allow_dragging: Cell<bool>,
    allow_momentum: Cell<bool>,
    session: Cell<Option<DragSession>>,
    on_drag_start: RefCell<Option<DragCallback>>,
    on_drag_end: RefCell<Option<DragCallback>>,
}

impl GestureArbiter {
    pub fn new(
        position: PositionCell,
        range: DraggableRange,
        momentum: Rc<dyn MomentumDriver>,
    ) -> Self {
        Self {
            position,
            momentum,
            range: Cell::new(range),
            config: Cell::new(MotionConfig::default()),
            allow_dragging: Cell::new(true),
            allow_momentum: Cell::new(true),
            session: Cell::new(None),
            on_drag_start: RefCell::new(None),
            on_drag_end: RefCell::new(None),
        }
    }

    pub fn with_config(self, config: MotionConfig) -> Self {
        self.config.set(config);
        self
    }

    pub fn range(&self) -> DraggableRange {
        self.range.get()
    }

    /// Replaces the draggable range. An active drag keeps its origin and is
    /// clamped against the new range from its next move.
    pub fn set_range(&self, range: DraggableRange) {
        self.range.set(range);
    }

    pub fn config(&self) -> MotionConfig {
        self.config.get()
    }

    pub fn set_config(&self, config: MotionConfig) {
        self.config.set(config);
    }

    pub fn allow_dragging(&self) -> bool {
        self.allow_dragging.get()
    }

    pub fn set_allow_dragging(&self, allow: bool) {
        self.allow_dragging.set(allow);
    }

    pub fn allow_momentum(&self) -> bool {
        self.allow_momentum.get()
    }

    pub fn set_allow_momentum(&self, allow: bool) {
        self.allow_momentum.set(allow);
    }

    pub fn set_on_drag_start(&self, callback: impl Fn(f32) + 'static) {
        *self.on_drag_start.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn set_on_drag_end(&self, callback: impl Fn(f32) + 'static) {
        *self.on_drag_end.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn drag_session(&self) -> Option<DragSession> {
        self.session.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.get().is_some()
    }

    /// Whether the panel should claim the gesture `sample` belongs to.
    ///
    /// A panel resting on a rail only captures drags that pull it back
    /// inward; anything below the distance threshold is treated as jitter.
    pub fn should_capture(&self, current_position: f32, sample: &GestureSample) -> bool {
        if !self.allow_dragging.get() || !sample.dy.is_finite() {
            return false;
        }
        if sample.dy.abs() <= self.config.get().min_distance_threshold {
            return false;
        }
        let range = self.range.get();
        if !range.contains(current_position) {
            return false;
        }
        let at_bottom = current_position <= range.bottom;
        let at_top = current_position >= range.top;
        match (at_bottom, at_top) {
            // Zero-span range: there is nowhere to go.
            (true, true) => false,
            // Finger moving up opens the panel.
            (true, false) => sample.dy < 0.0,
            (false, true) => sample.dy > 0.0,
            (false, false) => true,
        }
    }

    /// Takes over the position for a new drag starting at `current_position`.
    pub fn on_grant(&self, current_position: f32) {
        self.momentum.stop_momentum();
        if self.is_dragging() {
            log::debug!("drag re-granted before the previous one ended");
        }
        self.position.acquire(Writer::Drag);
        self.session.set(Some(DragSession {
            start_position: current_position,
        }));
        log::debug!("drag start at {current_position}");
        let callback = self.on_drag_start.borrow().clone();
        if let Some(callback) = callback {
            callback(current_position);
        }
    }

    /// Applies a move sample and returns the new clamped position.
    pub fn on_move(&self, sample: &GestureSample) -> f32 {
        let Some(session) = self.active_session("on_move") else {
            return self.position.get();
        };
        if !sample.dy.is_finite() {
            return self.position.get();
        }
        let value = self.range.get().clamp(session.start_position - sample.dy);
        self.position.set(Writer::Drag, value);
        value
    }

    /// Ends the drag and hands off to momentum when the release is fast
    /// enough.
    pub fn on_release(&self, sample: &GestureSample) {
        let Some(value) = self.end_session("on_release") else {
            return;
        };
        let config = self.config.get();
        let fast_enough = sample.vy.is_finite() && sample.vy.abs() > config.min_velocity_threshold;
        if self.allow_momentum.get() && fast_enough {
            log::debug!("drag released at {value} with velocity {}", sample.vy);
            self.momentum.start_momentum(value, sample.vy);
        } else {
            log::debug!("drag released at {value} without momentum");
        }
    }

    /// Ends a drag another responder took over. Never starts momentum.
    pub fn on_terminate(&self) {
        if let Some(value) = self.end_session("on_terminate") {
            log::debug!("drag terminated at {value}");
        }
    }

    fn active_session(&self, operation: &str) -> Option<DragSession> {
        let session = self.session.get();
        debug_assert!(session.is_some(), "{operation} called without on_grant");
        if session.is_none() {
            log::warn!("{operation} ignored: no drag in progress");
        }
        session
    }

    /// Closes the session and fires `on_drag_end`. Returns `None` for a
    /// void drag, which fires nothing.
    fn end_session(&self, operation: &str) -> Option<f32> {
        self.active_session(operation)?;
        self.session.set(None);
        self.position.release(Writer::Drag);

        let value = self.position.get();
        let range = self.range.get();
        if !range.contains(value) {
            log::warn!(
                "drag voided: {value} outside [{}, {}] after the range changed",
                range.bottom,
                range.top
            );
            return None;
        }
        let callback = self.on_drag_end.borrow().clone();
        if let Some(callback) = callback {
            callback(value);
        }
        Some(value)
    }
}

impl fmt::Debug for GestureArbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureArbiter")
            .field("range", &self.range.get())
            .field("allow_dragging", &self.allow_dragging.get())
            .field("allow_momentum", &self.allow_momentum.get())
            .field("session", &self.session.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/arbiter_tests.rs"]
mod tests;
