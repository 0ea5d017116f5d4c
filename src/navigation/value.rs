//! Observable value holders.
//!
//! A [`MutableValue`] stores a value and notifies its listeners synchronously
//! every time the value is replaced. [`Value`] is the read-only view handed
//! out to observers. Listeners are called with no internal borrow held, so a
//! listener may read the value or trigger another update.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Slot<T> {
    value: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
}

/// Writable observable value.
pub struct MutableValue<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

/// Read-only observable value.
pub struct Value<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

/// Non-owning handle to a [`MutableValue`].
pub struct WeakMutableValue<T> {
    slot: Weak<RefCell<Slot<T>>>,
}

impl<T> WeakMutableValue<T> {
    pub fn upgrade(&self) -> Option<MutableValue<T>> {
        self.slot.upgrade().map(|slot| MutableValue { slot })
    }
}

impl<T> Clone for MutableValue<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> Clone for Value<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&self.slot.borrow().value).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableValue")
            .field(&self.slot.borrow().value)
            .finish()
    }
}

impl<T: Default + Clone + 'static> Default for MutableValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> MutableValue<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Clone of the current value.
    pub fn value(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Replace the value and notify every listener with the new one.
    pub fn set(&self, value: T) {
        let (snapshot, listeners) = {
            let mut slot = self.slot.borrow_mut();
            slot.value = value;
            let listeners: Vec<Listener<T>> =
                slot.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (slot.value.clone(), listeners)
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Compute the next value from the current one and publish it.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let current = self.value();
        self.set(f(current));
    }

    /// Read-only view sharing the same storage.
    pub fn as_value(&self) -> Value<T> {
        Value {
            slot: Rc::clone(&self.slot),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        subscribe(&self.slot, Rc::new(listener))
    }

    /// Handle that does not keep the value (or anything it holds) alive.
    pub fn downgrade(&self) -> WeakMutableValue<T> {
        WeakMutableValue {
            slot: Rc::downgrade(&self.slot),
        }
    }
}

impl<T: Clone + 'static> Value<T> {
    /// Clone of the current value.
    pub fn value(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Register a listener. It is invoked once with the current value and
    /// then on every change until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        subscribe(&self.slot, Rc::new(listener))
    }

    pub fn listener_count(&self) -> usize {
        self.slot.borrow().listeners.len()
    }
}

fn subscribe<T: Clone + 'static>(
    slot: &Rc<RefCell<Slot<T>>>,
    listener: Listener<T>,
) -> Subscription {
    let (id, current) = {
        let mut guard = slot.borrow_mut();
        let id = guard.next_id;
        guard.next_id += 1;
        guard.listeners.push((id, Rc::clone(&listener)));
        (id, guard.value.clone())
    };
    listener(&current);

    let weak: Weak<RefCell<Slot<T>>> = Rc::downgrade(slot);
    Subscription {
        cancel: Some(Box::new(move || {
            if let Some(slot) = weak.upgrade() {
                slot.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })),
    }
}

/// Handle to a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
