use std::cell::RefCell;
use std::rc::Rc;

/// Collects values emitted by callbacks under test.
#[derive(Debug)]
pub struct Recorder<T> {
    values: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            values: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A callback that appends every value it is given.
    pub fn sink(&self) -> impl Fn(T) + 'static {
        let values = Rc::clone(&self.values);
        move |value| values.borrow_mut().push(value)
    }

    pub fn push(&self, value: T) {
        self.values.borrow_mut().push(value);
    }

    pub fn values(&self) -> Vec<T> {
        self.values.borrow().clone()
    }

    pub fn last(&self) -> Option<T> {
        self.values.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }
}

impl<T: Clone + 'static> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            values: Rc::clone(&self.values),
        }
    }
}
