// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sun_buttons --heading-base-level=0

//! Sun Buttons: interaction models for simulation buttons.
//!
//! This crate holds the *behavior* of buttons, separated from their
//! appearance. Each model consumes pointer state (`over`, `down`), an enabled
//! flag, and elapsed time from the host, and drives shared observable state
//! or listeners in response:
//!
//! - [`PushButtonModel`]: fires listeners on release (or press), with optional
//!   repeat-while-held.
//! - [`StickyToggleButtonModel`]: latches a two-valued property down on one
//!   press and pops it up on the next.
//! - [`RadioGroupMemberModel`] and [`RadioGroup`]: mutually exclusive
//!   selection through one shared property.
//! - [`MomentaryButtonModel`]: a boolean that is on only while pressed.
//!
//! ## Design Philosophy
//!
//! - **Host-agnostic**: no rendering, hit testing, or event loop. The host
//!   reports [`set_over`](ButtonModel::set_over) and
//!   [`set_down`](ButtonModel::set_down), and calls
//!   [`PushButtonModel::step`] with frame time for fire-on-hold.
//! - **Composition**: every model embeds a [`ButtonInteraction`] and adds only
//!   its own rules. The [`ButtonModel`] trait routes input uniformly.
//! - **Explicit ownership**: timers and subscriptions a model creates are
//!   released deterministically by [`ButtonModel::dispose`].
//! - **Fail fast**: contract violations (re-entrant fire, a toggle value that
//!   is neither up nor down, use after dispose) return a [`ButtonError`] and
//!   abort the operation.
//! - **Observable**: every action is bracketed through the
//!   [`Instrumentation`] port, and diagnostics go through `tracing`.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use sun_buttons::{ButtonContext, PushButtonModel, PushButtonOptions};
//! use sun_property::Property;
//!
//! let enabled = Property::new(true);
//! let button = PushButtonModel::new_in(
//!     PushButtonOptions::default(),
//!     ButtonContext::default().with_enabled(enabled.clone()),
//! )
//! .unwrap();
//!
//! let presses = Rc::new(Cell::new(0));
//! let seen = presses.clone();
//! button.add_listener(Rc::new(move || seen.set(seen.get() + 1)));
//!
//! button.set_over(true);
//! button.set_down(true).unwrap();
//! button.set_down(false).unwrap();
//! assert_eq!(presses.get(), 1);
//!
//! // Disabled buttons refuse presses.
//! enabled.set(false);
//! button.set_down(true).unwrap();
//! button.set_down(false).unwrap();
//! assert_eq!(presses.get(), 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): compile dependencies against the standard library.
//! - `serde`: `Serialize`/`Deserialize` for the option structs.
//!
//! This crate is `no_std` and uses `alloc`. Models are single-threaded
//! (`Rc`-based) and expect all input to arrive from one event loop.

#![no_std]

extern crate alloc;

mod error;
mod instrument;
mod interaction;
mod model;
mod momentary;
mod options;
mod push;
mod radio;
mod resource;
mod sticky;

pub use error::{ButtonError, OptionsError};
pub use instrument::{
    ButtonEvent, EventId, EventLog, Instrumentation, LogEntry, NoInstrumentation,
    TracingInstrumentation,
};
pub use interaction::{
    ButtonInteraction, Edge, InteractionFlags, InteractionState, RadioInteractionState,
};
pub use model::{ButtonContext, ButtonModel};
pub use momentary::MomentaryButtonModel;
pub use options::{
    DEFAULT_FIRE_ON_HOLD_DELAY, DEFAULT_FIRE_ON_HOLD_INTERVAL, LatchResetPolicy,
    MomentaryOptions, PushButtonOptions, RadioOptions, StickyToggleOptions,
};
pub use push::{Listener, PushButtonModel};
pub use radio::{RadioGroup, RadioGroupMemberModel};
pub use resource::ResourceList;
pub use sticky::StickyToggleButtonModel;
