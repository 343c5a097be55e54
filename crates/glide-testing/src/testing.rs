//! Deterministic frame driver.
//!
//! [`TestRuntime`] pairs a [`Runtime`] with a manual clock. Advancing a
//! frame moves the clock first and then drains frame callbacks stamped with
//! the new time, which is what a display-refresh loop does in production.

use glide_core::{Clock, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Duration of one frame at 60 Hz.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_nanos(&self, nanos: u64) {
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    pub fn advance_millis(&self, millis: f32) {
        self.advance_nanos((millis.max(0.0) * 1_000_000.0) as u64);
    }

    pub fn set_nanos(&self, nanos: u64) {
        self.nanos.store(nanos, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst)
    }
}

/// Scheduler that counts frame requests.
#[derive(Debug, Default)]
pub struct TestScheduler {
    requests: AtomicUsize,
}

impl TestScheduler {
    pub fn frame_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RuntimeScheduler for TestScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// Runtime driven by a manual clock.
pub struct TestRuntime {
    runtime: Runtime,
    clock: Arc<ManualClock>,
    scheduler: Arc<TestScheduler>,
    frames: usize,
}

impl TestRuntime {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new());
        let scheduler = Arc::new(TestScheduler::default());
        let runtime = Runtime::new(scheduler.clone(), clock.clone());
        Self {
            runtime,
            clock,
            scheduler,
            frames: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn scheduler(&self) -> &TestScheduler {
        &self.scheduler
    }

    /// Frames drained so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn now_millis(&self) -> f32 {
        self.clock.now_nanos() as f32 / 1_000_000.0
    }

    /// Advances one 60 Hz frame.
    pub fn advance_frame(&mut self) {
        self.advance_frame_by_nanos(FRAME_NANOS);
    }

    /// Advances one frame of arbitrary length.
    pub fn advance_frame_by_millis(&mut self, millis: f32) {
        self.advance_frame_by_nanos((millis.max(0.0) * 1_000_000.0) as u64);
    }

    fn advance_frame_by_nanos(&mut self, nanos: u64) {
        self.clock.advance_nanos(nanos);
        self.frames += 1;
        self.runtime.drain_frame_callbacks(self.clock.now_nanos());
    }

    pub fn run_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Advances frames until nothing waits for one, up to `max_frames`.
    ///
    /// Returns the number of frames that ran; hitting the cap means the
    /// animation under test never settled.
    pub fn run_until_idle(&mut self, max_frames: usize) -> usize {
        let mut ran = 0;
        while self.runtime.has_frame_callbacks() && ran < max_frames {
            self.advance_frame();
            ran += 1;
        }
        ran
    }

    pub fn is_idle(&self) -> bool {
        !self.runtime.has_frame_callbacks()
    }
}

impl Default for TestRuntime {
    fn default() -> Self {
        Self::new()
    }
}
