// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sun Property: observable values with synchronous change notification.
//!
//! Button models never own the state they drive. The enabled flag belongs to
//! the widget, a toggle value belongs to the application, and a radio group's
//! selection is shared by every member of the group. This crate provides the
//! shared, observable cell those models read, write, and watch.
//!
//! ## Core Concepts
//!
//! - [`Property`] is a cheaply clonable handle. Clones share one value and one
//!   observer list, so handing the same property to several models is how they
//!   coordinate.
//! - [`Property::set`] notifies observers synchronously, in subscription
//!   order, and only when the value actually changes.
//! - [`Property::link`] and [`Property::lazy_link`] return a [`Subscription`]
//!   that must be released explicitly with [`Subscription::unsubscribe`].
//!   Dropping a subscription leaves the observer registered, so owners decide
//!   exactly when (and in which order) their observers go away.
//!
//! ## Quick Start
//!
//! ```rust
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use sun_property::Property;
//!
//! let enabled = Property::new(true);
//! let changes = Rc::new(Cell::new(0));
//!
//! let seen = changes.clone();
//! let subscription = enabled.lazy_link(move |old, new| {
//!     assert_eq!(old, Some(&!*new));
//!     seen.set(seen.get() + 1);
//! });
//!
//! enabled.set(false);
//! enabled.set(false); // unchanged, no notification
//! enabled.set(true);
//! assert_eq!(changes.get(), 2);
//!
//! assert!(subscription.unsubscribe());
//! enabled.set(false);
//! assert_eq!(changes.get(), 2);
//! ```
//!
//! ## Re-entrancy
//!
//! Observers may read the property and may call [`Property::set`] again; the
//! nested notification runs to completion, and the outer one then stops so no
//! observer is handed a value the property no longer holds.
//! Observers added or removed while a notification is in flight only take
//! effect for the next change.
//!
//! This crate is `no_std` and uses `alloc`. It is single-threaded by
//! construction (`Rc`-based).

#![no_std]

extern crate alloc;

mod property;
mod subscription;

pub use property::{Observer, Property};
pub use subscription::{ObserverId, Subscription};
