//! Pointer stream to gesture samples.
//!
//! Hosts that receive raw pointer events instead of pre-digested gesture
//! state feed them through a [`GestureTracker`], which keeps the cumulative
//! displacement since the pointer went down and estimates release velocity.

use crate::gesture_constants::{MAX_FLING_VELOCITY, MILLIS_PER_SECOND};
use crate::sample::GestureSample;
use crate::velocity_tracker::VelocityTracker1D;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Raw pointer reading in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub kind: PointerEventKind,
    pub time_ms: i64,
    pub x: f32,
    pub y: f32,
}

impl PointerInput {
    pub fn new(kind: PointerEventKind, time_ms: i64, x: f32, y: f32) -> Self {
        Self { kind, time_ms, x, y }
    }

    pub fn down(time_ms: i64, x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, time_ms, x, y)
    }

    pub fn moved(time_ms: i64, x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, time_ms, x, y)
    }

    pub fn up(time_ms: i64, x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, time_ms, x, y)
    }

    pub fn cancel(time_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, time_ms, 0.0, 0.0)
    }
}

/// Turns a single pointer's events into [`GestureSample`]s.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    origin: Option<(f32, f32)>,
    velocity_x: VelocityTracker1D,
    velocity_y: VelocityTracker1D,
    /// Units per second.
    max_velocity: f32,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::with_max_velocity(MAX_FLING_VELOCITY)
    }

    /// `max_velocity` caps release speed, in units per second.
    pub fn with_max_velocity(max_velocity: f32) -> Self {
        Self {
            origin: None,
            velocity_x: VelocityTracker1D::new(),
            velocity_y: VelocityTracker1D::new(),
            max_velocity,
        }
    }

    /// Whether a pointer is currently down.
    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    /// Feeds one pointer event.
    ///
    /// Returns the sample for `Down`, `Move` and `Up`; `None` for `Cancel`
    /// and for events that arrive without a preceding `Down`.
    pub fn track(&mut self, input: PointerInput) -> Option<GestureSample> {
        match input.kind {
            PointerEventKind::Down => {
                self.velocity_x.reset();
                self.velocity_y.reset();
                self.origin = Some((input.x, input.y));
                self.record(input);
                Some(GestureSample::default())
            }
            PointerEventKind::Move => self.sample_at(input),
            PointerEventKind::Up => {
                let sample = self.sample_at(input);
                self.origin = None;
                sample
            }
            PointerEventKind::Cancel => {
                self.origin = None;
                None
            }
        }
    }

    fn record(&mut self, input: PointerInput) {
        self.velocity_x.add_sample(input.time_ms, input.x);
        self.velocity_y.add_sample(input.time_ms, input.y);
    }

    fn sample_at(&mut self, input: PointerInput) -> Option<GestureSample> {
        let (origin_x, origin_y) = self.origin?;
        if !input.x.is_finite() || !input.y.is_finite() {
            log::warn!("dropping non-finite pointer position ({}, {})", input.x, input.y);
            return None;
        }
        self.record(input);
        Some(GestureSample {
            dx: input.x - origin_x,
            dy: input.y - origin_y,
            vx: self.velocity_x.velocity_with_max(self.max_velocity) / MILLIS_PER_SECOND,
            vy: self.velocity_y.velocity_with_max(self.max_velocity) / MILLIS_PER_SECOND,
        })
    }
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
