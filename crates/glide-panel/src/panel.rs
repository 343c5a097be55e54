//! The sliding panel host.
//!
//! `SlidingPanel` owns the position cell and wires the gesture arbiter, the
//! flick engine and the tween together. It is the only piece that knows
//! about anchors, keyboard displacement and the backdrop.

use crate::config::{PanelConfig, PanelError};
use crate::keyboard::{keyboard_overlap, ElementMeasure, KeyboardDisplacement};
use glide_animation::{FlickConfig, FlickEngine, Tween, TweenOutcome, TweenSpec};
use glide_core::{DraggableRange, MotionConfig, PositionCell, RuntimeHandle, Subscription, Writer};
use glide_foundation::{
    AnchorSet, GestureArbiter, GestureSample, GestureTracker, MomentumDriver, PointerEventKind,
    PointerInput,
};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Target of [`SlidingPanel::show`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ShowRequest {
    /// Tween to the top of the draggable range.
    #[default]
    Top,
    /// Tween to a specific value, clamped into the range.
    To(f32),
    /// Flick toward `to_value`, starting with `velocity` (its magnitude is
    /// used; the direction always points at the target).
    Fling { to_value: f32, velocity: f32 },
}

type PanelCallback = Rc<dyn Fn(f32)>;

#[derive(Default)]
struct PanelCallbacks {
    on_momentum_start: RefCell<Option<PanelCallback>>,
    on_momentum_end: RefCell<Option<PanelCallback>>,
    on_bottom_reached: RefCell<Option<PanelCallback>>,
}

impl PanelCallbacks {
    fn fire(slot: &RefCell<Option<PanelCallback>>, value: f32) {
        let callback = slot.borrow().clone();
        if let Some(callback) = callback {
            callback(value);
        }
    }
}

struct PanelInner {
    position: PositionCell,
    engine: FlickEngine,
    tween: Tween,
    arbiter: GestureArbiter,
    range: Cell<DraggableRange>,
    snapping_points: Vec<f32>,
    anchors: RefCell<AnchorSet>,
    friction: f32,
    backdrop_opacity: f32,
    avoid_keyboard: bool,
    keyboard_margin: f32,
    viewport_height: f32,
    tween_spec: TweenSpec,
    keyboard: Cell<Option<KeyboardDisplacement>>,
    /// Set while the panel itself stops a flick to start something else.
    interrupting: Cell<bool>,
    /// Set when a host command ended the drag; the rest of that gesture is
    /// ignored until a new grant.
    drag_cancelled: Cell<bool>,
    tracker: RefCell<GestureTracker>,
    callbacks: PanelCallbacks,
}

/// Routes the arbiter's momentum requests back into the panel.
struct PanelMomentum {
    panel: Weak<PanelInner>,
}

impl MomentumDriver for PanelMomentum {
    fn stop_momentum(&self) {
        if let Some(panel) = self.panel.upgrade() {
            panel.stop_motion();
        }
    }

    fn start_momentum(&self, from_value: f32, velocity: f32) {
        if let Some(panel) = self.panel.upgrade() {
            panel.fling(from_value, velocity);
        }
    }
}

impl PanelInner {
    fn stop_motion(&self) {
        self.interrupt_flick();
        self.tween.cancel();
    }

    /// Stops a running flick without treating its end as coming to rest.
    fn interrupt_flick(&self) {
        self.interrupting.set(true);
        self.engine.stop();
        self.interrupting.set(false);
    }

    /// Hands the position back from an active drag before the panel
    /// animates it. The drag ends without momentum.
    fn end_drag(&self) {
        if self.arbiter.is_dragging() {
            log::debug!("drag ended by a host command");
            self.arbiter.on_terminate();
            self.drag_cancelled.set(true);
        }
    }

    fn is_moving(&self) -> bool {
        self.engine.is_running() || self.tween.is_running()
    }

    /// Release momentum: free flick, or homing on the anchor closest to
    /// the predicted landing position.
    fn fling(self: &Rc<Self>, from_value: f32, velocity: f32) {
        let target = {
            let anchors = self.anchors.borrow();
            if anchors.is_trivial() {
                None
            } else {
                let predicted = self
                    .engine
                    .predict_next_position(from_value, velocity, self.friction);
                anchors.closest_to(predicted)
            }
        };

        match target {
            Some(target) => {
                log::debug!("fling from {from_value} toward anchor {target}");
                self.start_flick(from_value, toward(from_value, target, velocity), Some(target));
            }
            None => self.start_flick(from_value, velocity, None),
        }
    }

    fn start_flick(self: &Rc<Self>, from_value: f32, velocity: f32, target: Option<f32>) {
        self.end_drag();
        self.interrupt_flick();
        self.tween.cancel();
        PanelCallbacks::fire(&self.callbacks.on_momentum_start, from_value);

        let panel = Rc::downgrade(self);
        let mut config = FlickConfig::new(from_value, velocity, self.friction).on_momentum_end(
            move |value| {
                if let Some(panel) = panel.upgrade() {
                    PanelCallbacks::fire(&panel.callbacks.on_momentum_end, value);
                    if !panel.interrupting.get() {
                        panel.settle(value);
                    }
                }
            },
        );
        if let Some(target) = target {
            config = config.with_target(target);
        }
        self.engine.start(config);
    }

    fn tween_to(self: &Rc<Self>, target: f32) {
        self.end_drag();
        self.interrupt_flick();
        let target = self.range.get().clamp(target);
        let panel = Rc::downgrade(self);
        self.tween
            .animate_to(target, self.tween_spec, move |outcome| {
                if let TweenOutcome::Completed(value) = outcome {
                    if let Some(panel) = panel.upgrade() {
                        panel.settle(value);
                    }
                }
            });
    }

    /// Called whenever motion comes to rest.
    fn settle(&self, value: f32) {
        if value <= self.range.get().bottom {
            log::debug!("panel settled on bottom ({value})");
            PanelCallbacks::fire(&self.callbacks.on_bottom_reached, value);
        }
    }

    fn apply_range(&self, range: DraggableRange) {
        let previous = self.range.replace(range);
        // Widen first so the engine never sees an inverted pair.
        self.engine.set_min(range.bottom.min(previous.bottom));
        self.engine.set_max(range.top.max(previous.top));
        self.engine.set_min(range.bottom);
        self.engine.set_max(range.top);
        self.arbiter.set_range(range);
        *self.anchors.borrow_mut() = AnchorSet::new(&self.snapping_points, range);

        // Only an idle panel snaps. A drag outside the new range is voided on
        // release, and a flick clamps against it on its next step.
        let value = self.position.get();
        if self.position.writer() == Writer::Host && !range.contains(value) {
            self.position.set(Writer::Host, range.clamp(value));
        }
    }
}

/// Draggable panel sliding between the bottom and top of its range.
///
/// Cloning yields another handle to the same panel.
#[derive(Clone)]
pub struct SlidingPanel {
    inner: Rc<PanelInner>,
}

impl SlidingPanel {
    /// Creates a panel resting on the bottom of its range.
    pub fn new(config: PanelConfig, runtime: RuntimeHandle) -> Result<Self, PanelError> {
        config.validate()?;
        let PanelConfig {
            draggable_range: range,
            snapping_points,
            friction,
            allow_dragging,
            allow_momentum,
            backdrop_opacity,
            avoid_keyboard,
            keyboard_margin,
            viewport_height,
            tween: tween_spec,
            motion,
        } = config;

        let position = PositionCell::new(range.bottom);
        let inner = Rc::new_cyclic(|panel: &Weak<PanelInner>| {
            let engine = FlickEngine::with_position(
                position.clone(),
                range.bottom,
                range.top,
                runtime.clone(),
                &motion,
            );
            let tween = Tween::new(position.clone(), runtime.clone());
            let momentum = Rc::new(PanelMomentum {
                panel: panel.clone(),
            });
            let arbiter =
                GestureArbiter::new(position.clone(), range, momentum).with_config(motion);
            arbiter.set_allow_dragging(allow_dragging);
            arbiter.set_allow_momentum(allow_momentum);
            let anchors = AnchorSet::new(&snapping_points, range);

            PanelInner {
                position: position.clone(),
                engine,
                tween,
                arbiter,
                range: Cell::new(range),
                snapping_points,
                anchors: RefCell::new(anchors),
                friction,
                backdrop_opacity,
                avoid_keyboard,
                keyboard_margin,
                viewport_height,
                tween_spec,
                keyboard: Cell::new(None),
                interrupting: Cell::new(false),
                drag_cancelled: Cell::new(false),
                tracker: RefCell::new(GestureTracker::new()),
                callbacks: PanelCallbacks::default(),
            }
        });
        Ok(Self { inner })
    }

    pub fn value(&self) -> f32 {
        self.inner.position.get()
    }

    pub fn position(&self) -> &PositionCell {
        &self.inner.position
    }

    pub fn draggable_range(&self) -> DraggableRange {
        self.inner.range.get()
    }

    pub fn anchors(&self) -> AnchorSet {
        self.inner.anchors.borrow().clone()
    }

    pub fn motion_config(&self) -> MotionConfig {
        self.inner.arbiter.config()
    }

    pub fn flick_engine(&self) -> &FlickEngine {
        &self.inner.engine
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.arbiter.is_dragging()
    }

    /// Whether a flick or tween is moving the panel.
    pub fn is_animating(&self) -> bool {
        self.inner.is_moving()
    }

    /// Observes every position change. The listener stays registered while
    /// the returned subscription lives.
    pub fn on_position_change(&self, listener: impl Fn(f32) + 'static) -> Subscription {
        self.inner.position.subscribe(listener)
    }

    pub fn set_on_drag_start(&self, callback: impl Fn(f32) + 'static) {
        self.inner.arbiter.set_on_drag_start(callback);
    }

    pub fn set_on_drag_end(&self, callback: impl Fn(f32) + 'static) {
        self.inner.arbiter.set_on_drag_end(callback);
    }

    pub fn set_on_momentum_start(&self, callback: impl Fn(f32) + 'static) {
        *self.inner.callbacks.on_momentum_start.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn set_on_momentum_end(&self, callback: impl Fn(f32) + 'static) {
        *self.inner.callbacks.on_momentum_end.borrow_mut() = Some(Rc::new(callback));
    }

    /// Fires whenever motion comes to rest on the bottom of the range.
    pub fn set_on_bottom_reached(&self, callback: impl Fn(f32) + 'static) {
        *self.inner.callbacks.on_bottom_reached.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn set_allow_dragging(&self, allow: bool) {
        self.inner.arbiter.set_allow_dragging(allow);
    }

    pub fn set_allow_momentum(&self, allow: bool) {
        self.inner.arbiter.set_allow_momentum(allow);
    }

    /// Replaces the draggable range without interrupting a running flick.
    pub fn set_draggable_range(&self, range: DraggableRange) -> Result<(), PanelError> {
        let range = DraggableRange::new(range.bottom, range.top)?;
        if self.inner.keyboard.take().is_some() {
            log::debug!("draggable range replaced while displaced by the keyboard");
        }
        self.inner.apply_range(range);
        Ok(())
    }

    /// Opacity of the backdrop for the current position.
    pub fn backdrop_opacity(&self) -> f32 {
        let range = self.inner.range.get();
        let value = self.value();
        let openness = if range.span() > 0.0 {
            ((value - range.bottom) / range.span()).clamp(0.0, 1.0)
        } else if value >= range.top {
            1.0
        } else {
            0.0
        };
        openness * self.inner.backdrop_opacity
    }

    pub fn show(&self, request: ShowRequest) {
        let range = self.inner.range.get();
        match request {
            ShowRequest::Top => self.inner.tween_to(range.top),
            ShowRequest::To(value) => self.inner.tween_to(value),
            ShowRequest::Fling { to_value, velocity } => {
                let from = self.value();
                let target = range.clamp(to_value);
                let speed = velocity.abs();
                if target == from || !speed.is_finite() || speed == 0.0 {
                    self.inner.tween_to(target);
                    return;
                }
                self.inner
                    .start_flick(from, toward(from, target, speed), Some(target));
            }
        }
    }

    pub fn hide(&self) {
        self.inner.tween_to(self.inner.range.get().bottom);
    }

    /// Stops any flick or tween where it is.
    pub fn stop(&self) {
        self.inner.stop_motion();
    }

    pub fn should_capture(&self, sample: &GestureSample) -> bool {
        self.inner.arbiter.should_capture(self.value(), sample)
    }

    pub fn on_grant(&self) {
        self.inner.drag_cancelled.set(false);
        if let Some(mut displacement) = self.inner.keyboard.get() {
            displacement.user_dragged = true;
            self.inner.keyboard.set(Some(displacement));
        }
        self.inner.arbiter.on_grant(self.value());
    }

    /// Applies a drag sample. Moves of a gesture that `show`, `hide` or
    /// keyboard avoidance cut short leave the value alone.
    pub fn on_move(&self, sample: &GestureSample) -> f32 {
        if self.inner.drag_cancelled.get() {
            return self.value();
        }
        self.inner.arbiter.on_move(sample)
    }

    pub fn on_release(&self, sample: &GestureSample) {
        if self.inner.drag_cancelled.replace(false) {
            return;
        }
        self.inner.arbiter.on_release(sample);
        self.after_drag();
    }

    pub fn on_terminate(&self) {
        if self.inner.drag_cancelled.replace(false) {
            return;
        }
        self.inner.arbiter.on_terminate();
        self.after_drag();
    }

    fn after_drag(&self) {
        if self.inner.is_moving() || self.inner.position.writer() != Writer::Host {
            return;
        }
        let range = self.inner.range.get();
        let value = self.value();
        if !range.contains(value) {
            // Void drag: snap back inside without firing drag callbacks.
            self.inner.position.set(Writer::Host, range.clamp(value));
        }
        self.inner.settle(self.value());
    }

    /// Drives the gesture callbacks from raw pointer events.
    ///
    /// Returns whether the panel consumed the event.
    pub fn handle_pointer(&self, input: PointerInput) -> bool {
        let sample = self.inner.tracker.borrow_mut().track(input);
        if self.inner.drag_cancelled.get() {
            // The rest of a cut-short gesture is not ours; a new pointer is.
            let gesture_over = matches!(
                input.kind,
                PointerEventKind::Down | PointerEventKind::Up | PointerEventKind::Cancel
            );
            if gesture_over {
                self.inner.drag_cancelled.set(false);
            }
            return false;
        }
        let dragging = self.is_dragging();
        match (input.kind, sample) {
            (PointerEventKind::Move, Some(sample)) => {
                if !dragging {
                    if !self.should_capture(&sample) {
                        return false;
                    }
                    self.on_grant();
                }
                self.on_move(&sample);
                true
            }
            (PointerEventKind::Up, Some(sample)) if dragging => {
                self.on_release(&sample);
                true
            }
            (PointerEventKind::Cancel, _) if dragging => {
                self.on_terminate();
                true
            }
            _ => false,
        }
    }

    /// Raises the panel so `focused` stays above a keyboard of
    /// `keyboard_height`.
    pub fn keyboard_shown(&self, keyboard_height: f32, focused: &dyn ElementMeasure) {
        if !self.inner.avoid_keyboard {
            return;
        }
        self.scroll_into_view(focused, keyboard_height);
    }

    /// Puts back the position and range from before the keyboard appeared.
    /// A drag in the meantime keeps the user's position.
    pub fn keyboard_hidden(&self) {
        let Some(displacement) = self.inner.keyboard.take() else {
            return;
        };
        self.inner.apply_range(displacement.original_range);
        if !displacement.user_dragged {
            self.inner.tween_to(displacement.restore_value);
        }
    }

    /// Moves the panel up until `element` clears a keyboard of
    /// `keyboard_height`, shrinking the range so it cannot be dragged back
    /// underneath.
    pub fn scroll_into_view(&self, element: &dyn ElementMeasure, keyboard_height: f32) {
        let Some(layout) = element.measure() else {
            log::debug!("focused element not laid out; keyboard ignored");
            return;
        };
        let inner = &self.inner;
        let overlap = keyboard_overlap(
            &layout,
            inner.viewport_height,
            keyboard_height,
            inner.keyboard_margin,
        );
        if overlap == 0.0 {
            return;
        }

        let range = inner.range.get();
        let value = self.value();
        let target = (value + overlap).min(range.top);
        let displacement = inner.keyboard.get().unwrap_or(KeyboardDisplacement {
            restore_value: value,
            original_range: range,
            user_dragged: false,
        });
        inner.keyboard.set(Some(displacement));
        log::debug!("keyboard overlap {overlap}: raising panel {value} -> {target}");

        inner.tween_to(target);
        inner.apply_range(DraggableRange {
            bottom: target.max(range.bottom),
            top: range.top,
        });
    }
}

impl fmt::Debug for SlidingPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlidingPanel")
            .field("value", &self.value())
            .field("range", &self.inner.range.get())
            .field("dragging", &self.is_dragging())
            .field("animating", &self.is_animating())
            .finish()
    }
}

/// Release velocity re-aimed at `target`: positive velocity moves toward
/// the bottom, so a target above `from` needs a negative one.
fn toward(from: f32, target: f32, velocity: f32) -> f32 {
    let speed = velocity.abs();
    if target > from {
        -speed
    } else if target < from {
        speed
    } else {
        velocity
    }
}

#[cfg(test)]
#[path = "tests/panel_tests.rs"]
mod tests;
