//! Component lifecycle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Alive but not in the foreground (e.g. covered by another screen).
    Created,
    /// Alive and in the foreground.
    Resumed,
    /// Terminal state. No further transitions happen.
    Destroyed,
}

type Observer = Rc<dyn Fn(LifecycleState)>;

struct LifecycleInner {
    name: String,
    state: LifecycleState,
    observers: Vec<Observer>,
    children: Vec<Weak<RefCell<LifecycleInner>>>,
}

/// Shared lifecycle handle. Clones refer to the same lifecycle.
#[derive(Clone)]
pub struct Lifecycle {
    inner: Rc<RefCell<LifecycleInner>>,
}

impl Lifecycle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LifecycleInner {
                name: name.into(),
                state: LifecycleState::Created,
                observers: Vec::new(),
                children: Vec::new(),
            })),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.borrow().state
    }

    pub fn is_destroyed(&self) -> bool {
        self.state() == LifecycleState::Destroyed
    }

    /// Observe transitions. The observer is not called for the current state.
    pub fn observe(&self, observer: impl Fn(LifecycleState) + 'static) {
        if self.is_destroyed() {
            return;
        }
        self.inner.borrow_mut().observers.push(Rc::new(observer));
    }

    /// Create a lifecycle that is destroyed together with this one.
    pub fn child(&self, name: impl Into<String>) -> Lifecycle {
        let child = Lifecycle::new(name);
        if self.is_destroyed() {
            child.destroy();
            return child;
        }
        let mut inner = self.inner.borrow_mut();
        inner.children.retain(|c| c.strong_count() > 0);
        inner.children.push(Rc::downgrade(&child.inner));
        child
    }

    pub fn resume(&self) {
        self.transition(LifecycleState::Resumed);
    }

    pub fn pause(&self) {
        self.transition(LifecycleState::Created);
    }

    /// Destroy children first, then this lifecycle.
    pub fn destroy(&self) {
        if self.is_destroyed() {
            return;
        }
        let children: Vec<Lifecycle> = self
            .inner
            .borrow_mut()
            .children
            .drain(..)
            .filter_map(|weak| weak.upgrade())
            .map(|inner| Lifecycle { inner })
            .collect();
        for child in children {
            child.destroy();
        }
        self.transition(LifecycleState::Destroyed);
        self.inner.borrow_mut().observers.clear();
    }

    fn transition(&self, next: LifecycleState) {
        let observers = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == next || inner.state == LifecycleState::Destroyed {
                return;
            }
            tracing::trace!(component = %inner.name, from = ?inner.state, to = ?next, "lifecycle");
            inner.state = next;
            inner.observers.clone()
        };
        for observer in observers {
            observer(next);
        }
    }
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Lifecycle")
            .field("name", &inner.name)
            .field("state", &inner.state)
            .finish()
    }
}
