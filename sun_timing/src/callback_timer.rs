// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delay-then-repeat callback schedule.

use core::fmt;
use core::time::Duration;

/// Error returned when a timer cannot be constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerError {
    /// The repeat interval was zero, which would make infinitely many
    /// callbacks due at once.
    ZeroInterval,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInterval => f.write_str("callback timer interval must be non-zero"),
        }
    }
}

impl core::error::Error for TimerError {}

/// A cancellable delay-then-repeat schedule driven by the host.
///
/// The timer does not hold the callback. The owner advances time with
/// [`advance`](Self::advance), asks [`poll`](Self::poll) whether a callback is
/// due, and runs it. Draining one callback at a time lets the owner observe
/// side effects of each callback (for example, a callback that stops the
/// timer cancels the remaining due callbacks).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackTimer {
    delay: Duration,
    interval: Duration,
    running: bool,
    /// Whether the callback has come due at least once since the last `start`.
    fired: bool,
    /// Time accumulated towards the next due callback.
    elapsed: Duration,
    /// Length of the current wait: `delay` before the first callback, then `interval`.
    next_due: Duration,
}

impl CallbackTimer {
    /// Creates a stopped timer.
    ///
    /// `delay` is the wait between [`start`](Self::start) and the first
    /// callback; `interval` is the wait between subsequent callbacks.
    pub fn new(delay: Duration, interval: Duration) -> Result<Self, TimerError> {
        if interval.is_zero() {
            return Err(TimerError::ZeroInterval);
        }
        Ok(Self {
            delay,
            interval,
            running: false,
            fired: false,
            elapsed: Duration::ZERO,
            next_due: delay,
        })
    }

    /// Returns the initial delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the repeat interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` between [`start`](Self::start) and [`stop`](Self::stop).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns `true` if a callback has come due since the last start.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Starts the schedule. Does nothing if the timer is already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.fired = false;
        self.elapsed = Duration::ZERO;
        self.next_due = self.delay;
    }

    /// Stops the schedule and discards any callbacks that are due but not yet polled.
    ///
    /// Returns `true` when the owner should run the callback one final time:
    /// the timer was running, `fire_final` was requested, and no callback has
    /// come due during this run.
    pub fn stop(&mut self, fire_final: bool) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.elapsed = Duration::ZERO;
        fire_final && !self.fired
    }

    /// Accumulates `dt` of elapsed time. Does nothing while stopped.
    pub fn advance(&mut self, dt: Duration) {
        if self.running {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    /// Consumes one due callback, returning `true` if the owner should run it now.
    pub fn poll(&mut self) -> bool {
        if !self.running || self.elapsed < self.next_due {
            return false;
        }
        self.elapsed -= self.next_due;
        self.next_due = self.interval;
        self.fired = true;
        true
    }

    /// Returns the time left until the next callback, or `None` while stopped.
    ///
    /// Returns `Some(Duration::ZERO)` while callbacks are waiting to be polled.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        self.running
            .then(|| self.next_due.saturating_sub(self.elapsed))
    }
}
