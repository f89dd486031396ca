// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared observable cell.

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;

use crate::subscription::{ObserverId, ObserverList, Subscription};

/// Callback invoked when a property value changes.
///
/// The callback receives the old value (`None` for the initial call made by
/// [`Property::link`]) and the new value.
pub type Observer<T> = Rc<dyn Fn(Option<&T>, &T)>;

/// Inline capacity for observer lists.
///
/// A button's enabled flag is typically watched by its model and one view, so
/// this avoids heap allocation in the common case.
const INLINE_OBSERVERS: usize = 4;

struct Shared<T> {
    value: RefCell<T>,
    observers: RefCell<SmallVec<[(ObserverId, Observer<T>); INLINE_OBSERVERS]>>,
    next_id: Cell<u64>,
}

impl<T> ObserverList for Shared<T> {
    fn remove(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        match observers.iter().position(|(existing, _)| *existing == id) {
            Some(idx) => {
                observers.remove(idx);
                true
            }
            None => false,
        }
    }
}

/// A shared, observable value.
///
/// Cloning a `Property` clones the handle, not the value: every clone reads
/// and writes the same state and notifies the same observers.
///
/// # Example
///
/// ```rust
/// use sun_property::Property;
///
/// let selection = Property::new("red");
/// let view = selection.clone();
///
/// selection.set("blue");
/// assert_eq!(view.get(), "blue");
/// assert!(view.ptr_eq(&selection));
/// ```
pub struct Property<T: 'static> {
    shared: Rc<Shared<T>>,
}

impl<T: 'static> Property<T> {
    /// Creates a property holding `value` with no observers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(value),
                observers: RefCell::new(SmallVec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Calls `f` with a reference to the current value.
    ///
    /// `f` must not call [`Property::set`] on this property.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.borrow())
    }

    /// Subscribes `observer` and immediately calls it with `(None, &current)`.
    pub fn link(&self, observer: impl Fn(Option<&T>, &T) + 'static) -> Subscription {
        let observer: Observer<T> = Rc::new(observer);
        let subscription = self.register(observer.clone());
        self.with(|current| observer(None, current));
        subscription
    }

    /// Subscribes `observer` without calling it; it runs on the next change.
    pub fn lazy_link(&self, observer: impl Fn(Option<&T>, &T) + 'static) -> Subscription {
        self.register(Rc::new(observer))
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.shared.observers.borrow().len()
    }

    /// Returns `true` if both handles refer to the same property.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    fn register(&self, observer: Observer<T>) -> Subscription {
        let id = ObserverId::new(self.shared.next_id.get());
        self.shared.next_id.set(id.get().wrapping_add(1));
        self.shared.observers.borrow_mut().push((id, observer));
        let list: Weak<dyn ObserverList> = Rc::downgrade(&self.shared) as Weak<dyn ObserverList>;
        Subscription::new(list, id)
    }
}

impl<T: Clone + 'static> Property<T> {
    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> {
    /// Stores `value` and notifies observers if it differs from the current value.
    ///
    /// Observers run synchronously, in subscription order, against a snapshot
    /// of the observer list taken before the first one is called. If an
    /// observer sets a different value, the remaining observers of this change
    /// are skipped; they only see the nested change.
    pub fn set(&self, value: T) {
        if *self.shared.value.borrow() == value {
            return;
        }
        let old = self.shared.value.replace(value);
        let new = self.get();

        let snapshot: SmallVec<[Observer<T>; INLINE_OBSERVERS]> = self
            .shared
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in snapshot {
            // A nested `set` already reported the newer value to everyone.
            if *self.shared.value.borrow() != new {
                break;
            }
            observer(Some(&old), &new);
        }
    }
}

impl<T: 'static> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T: Default + 'static> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &*self.shared.value.borrow())
            .field("observers", &self.observer_count())
            .finish()
    }
}
