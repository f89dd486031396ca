// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observer identification and explicit subscription handles.

use alloc::rc::Weak;
use core::fmt;

/// Identifies one observer registration on a [`Property`](crate::Property).
///
/// Ids are unique per property for its whole lifetime; they are never reused
/// after an observer is removed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    #[must_use]
    #[inline]
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObserverId").field(&self.0).finish()
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObserverId({})", self.0)
    }
}

/// Type-erased access to a property's observer list.
pub(crate) trait ObserverList {
    fn remove(&self, id: ObserverId) -> bool;
}

/// A live observer registration.
///
/// Returned by [`Property::link`](crate::Property::link) and
/// [`Property::lazy_link`](crate::Property::lazy_link). The handle does not
/// keep the property alive, and dropping it does **not** remove the observer:
/// call [`Subscription::unsubscribe`] to release it.
#[must_use = "dropping a Subscription keeps the observer registered; call `unsubscribe` to release it"]
pub struct Subscription {
    list: Weak<dyn ObserverList>,
    id: ObserverId,
}

impl Subscription {
    pub(crate) fn new(list: Weak<dyn ObserverList>, id: ObserverId) -> Self {
        Self { list, id }
    }

    /// Returns the id of the observer this subscription refers to.
    #[must_use]
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Returns `true` while the property behind this subscription still exists.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.list.strong_count() > 0
    }

    /// Removes the observer from its property.
    ///
    /// Returns `false` if the observer was already gone or the property has
    /// been dropped.
    pub fn unsubscribe(self) -> bool {
        self.list
            .upgrade()
            .is_some_and(|list| list.remove(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}
