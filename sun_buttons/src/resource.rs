// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ownership list for observer registrations made by a model.

use alloc::vec::Vec;

use sun_property::Subscription;

/// Subscriptions a model created and must release on dispose.
///
/// [`release`](Self::release) unsubscribes in reverse registration order and
/// empties the list, so a second release does nothing.
#[derive(Debug, Default)]
pub struct ResourceList {
    subscriptions: Vec<Subscription>,
}

impl ResourceList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `subscription`.
    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Returns the number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns `true` if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Unsubscribes everything, last registered first.
    pub fn release(&mut self) {
        while let Some(subscription) = self.subscriptions.pop() {
            if !subscription.unsubscribe() {
                tracing::trace!("subscription already detached at release");
            }
        }
    }
}
