// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sun_timing --heading-base-level=0

//! Sun Timing: host-driven callback timers.
//!
//! UI models sometimes need to do something *later*: a push button that keeps
//! firing while it is held down waits for an initial delay and then repeats at
//! a fixed interval. This crate models that schedule without owning a clock or
//! an event loop. The host advances time explicitly and drains the callbacks
//! that fell due, which keeps the behavior deterministic and testable.
//!
//! ## Usage
//!
//! 1) Create a [`CallbackTimer`] with an initial delay and a repeat interval.
//! 2) Call [`CallbackTimer::start`] when the repeating behavior should begin.
//! 3) On every frame, call [`CallbackTimer::advance`] with the elapsed time,
//!    then call [`CallbackTimer::poll`] until it returns `false`, running the
//!    callback once per `true`.
//! 4) Call [`CallbackTimer::stop`] to cancel. Its return value says whether the
//!    callback should run one final time.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use sun_timing::CallbackTimer;
//!
//! let mut timer = CallbackTimer::new(
//!     Duration::from_millis(400),
//!     Duration::from_millis(100),
//! ).unwrap();
//!
//! timer.start();
//! timer.advance(Duration::from_millis(650));
//!
//! let mut fired = 0;
//! while timer.poll() {
//!     fired += 1;
//! }
//! // Due at 400, 500 and 600 ms.
//! assert_eq!(fired, 3);
//!
//! // The callback already ran during this run, so stopping asks for no final call.
//! assert!(!timer.stop(true));
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod callback_timer;

pub use callback_timer::{CallbackTimer, TimerError};
