//! Frame callback runtime.
//!
//! The runtime keeps a queue of one-shot frame callbacks and asks the host
//! scheduler for a frame whenever something is waiting. Hosts call
//! [`RuntimeHandle::drain_frame_callbacks`] once per display refresh with the
//! frame timestamp.

use crate::frame_clock::FrameClock;
use crate::platform::{Clock, RuntimeScheduler};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

pub type FrameCallbackId = u64;

/// Scheduler that ignores frame requests.
///
/// Useful for hosts that drain frame callbacks on their own cadence.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    clock: Arc<dyn Clock>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>, clock: Arc<dyn Clock>) -> Self {
        Self {
            scheduler,
            clock,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        // Callbacks registered while draining belong to the next frame.
        let last_id = self.next_frame_callback_id.get() - 1;
        loop {
            let entry = {
                let mut callbacks = self.frame_callbacks.borrow_mut();
                match callbacks.front() {
                    Some(entry) if entry.id <= last_id => callbacks.pop_front(),
                    _ => None,
                }
            };
            let Some(mut entry) = entry else {
                break;
            };
            if let Some(callback) = entry.callback.take() {
                callback(frame_time_nanos);
            }
        }
        self.needs_frame.set(self.has_frame_callbacks());
    }
}

/// Owner of the frame callback queue.
///
/// The runtime is single-threaded (`!Send`); only the scheduler and clock it
/// is built from cross thread boundaries.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler, clock)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }

    pub fn now_nanos(&self) -> u64 {
        self.inner.clock.now_nanos()
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner.has_frame_callbacks()
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("needs_frame", &self.inner.needs_frame.get())
            .field("pending_callbacks", &self.inner.frame_callbacks.borrow().len())
            .finish()
    }
}

/// Weak handle to a [`Runtime`].
///
/// Every operation is a no-op once the runtime has been dropped.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    /// Current time of the runtime's clock, or zero if the runtime is gone.
    pub fn now_nanos(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.clock.now_nanos())
            .unwrap_or(0)
    }

    /// Milliseconds since `since_nanos` on the runtime's clock.
    pub fn elapsed_millis(&self, since_nanos: u64) -> f32 {
        self.inner
            .upgrade()
            .map(|inner| inner.clock.elapsed_millis(since_nanos))
            .unwrap_or(0.0)
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
