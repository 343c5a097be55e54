//! Single-writer observable position.
//!
//! The panel offset is the only mutable value shared between the host, the
//! drag arbiter and the animations. Exactly one [`Writer`] owns it at a
//! time; the others must acquire it (which the stop-before-start protocol of
//! the motion components guarantees) before they write.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Component currently allowed to write the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Writer {
    /// The hosting widget; owner whenever nothing is moving.
    Host,
    /// An active drag gesture.
    Drag,
    /// A running flick simulation.
    Flick,
    /// A timed tween (programmatic show/hide, keyboard displacement).
    Tween,
}

type Listener = Rc<dyn Fn(f32)>;

struct PositionInner {
    value: f32,
    writer: Writer,
    listeners: SmallVec<[(u64, Listener); 4]>,
    next_listener_id: u64,
}

/// Shared, observable panel position.
///
/// Cloning yields another handle to the same cell.
#[derive(Clone)]
pub struct PositionCell {
    inner: Rc<RefCell<PositionInner>>,
}

impl PositionCell {
    pub fn new(initial: f32) -> Self {
        let value = if initial.is_finite() { initial } else { 0.0 };
        Self {
            inner: Rc::new(RefCell::new(PositionInner {
                value,
                writer: Writer::Host,
                listeners: SmallVec::new(),
                next_listener_id: 1,
            })),
        }
    }

    pub fn get(&self) -> f32 {
        self.inner.borrow().value
    }

    pub fn writer(&self) -> Writer {
        self.inner.borrow().writer
    }

    /// Makes `writer` the owner and returns the previous owner.
    pub fn acquire(&self, writer: Writer) -> Writer {
        let previous = std::mem::replace(&mut self.inner.borrow_mut().writer, writer);
        if previous != writer && previous != Writer::Host {
            log::debug!("position ownership moved from {previous:?} to {writer:?}");
        }
        previous
    }

    /// Hands ownership back to the host if `writer` still owns the cell.
    pub fn release(&self, writer: Writer) {
        let mut inner = self.inner.borrow_mut();
        if inner.writer == writer {
            inner.writer = Writer::Host;
        }
    }

    /// Writes a new value on behalf of `writer` and notifies listeners.
    ///
    /// Returns `false` when the write was rejected: either `writer` does not
    /// own the cell or `value` is not finite.
    pub fn set(&self, writer: Writer, value: f32) -> bool {
        let listeners: SmallVec<[Listener; 4]> = {
            let mut inner = self.inner.borrow_mut();
            if inner.writer != writer {
                debug_assert!(
                    false,
                    "{writer:?} wrote the position while {:?} owns it",
                    inner.writer
                );
                log::warn!(
                    "ignoring position write from {writer:?}; owned by {:?}",
                    inner.writer
                );
                return false;
            }
            if !value.is_finite() {
                log::warn!("ignoring non-finite position {value} from {writer:?}");
                return false;
            }
            if inner.value == value {
                return true;
            }
            inner.value = value;
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect()
        };
        for listener in listeners {
            listener(value);
        }
        true
    }

    /// Registers `listener` for every subsequent value change.
    ///
    /// The listener stays registered for as long as the returned
    /// [`Subscription`] lives.
    pub fn subscribe(&self, listener: impl Fn(f32) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription {
            cell: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl fmt::Debug for PositionCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("PositionCell")
            .field("value", &inner.value)
            .field("writer", &inner.writer)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Disposer for a position listener. Dropping it unregisters the listener.
pub struct Subscription {
    cell: Weak<RefCell<PositionInner>>,
    id: Option<u64>,
}

impl Subscription {
    pub fn dispose(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(cell) = self.cell.upgrade() {
            cell.borrow_mut()
                .listeners
                .retain(|(listener_id, _)| *listener_id != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
