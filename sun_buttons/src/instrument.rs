// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instrumentation port for recording and replaying button activity.
//!
//! Every model brackets its observable actions (firing listeners, toggling a
//! value, selecting a radio value) with [`Instrumentation::start`] before it
//! mutates shared state and [`Instrumentation::end`] afterwards. Sinks may
//! nest: a listener that toggles another button produces a bracket inside the
//! bracket of the button that fired it.
//!
//! The models never read anything back from the sink, so swapping sinks cannot
//! change behavior.
//!
//! ```
//! use std::rc::Rc;
//! use sun_buttons::{ButtonContext, EventLog, PushButtonModel, PushButtonOptions};
//!
//! let log = Rc::new(EventLog::new());
//! let button = PushButtonModel::new_in(
//!     PushButtonOptions::default().with_phetio_id("resetAllButton"),
//!     ButtonContext::default().with_instrumentation(log.clone()),
//! )
//! .unwrap();
//!
//! button.fire().unwrap();
//! assert!(log.is_balanced());
//! assert_eq!(log.started(), vec![("fired", "resetAllButton".to_string())]);
//! ```

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

/// Identifies one start/end bracket issued by an [`Instrumentation`] sink.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventId(pub u64);

/// An action a button model is about to perform.
#[derive(Copy, Clone, Debug)]
pub enum ButtonEvent<'a> {
    /// A push button is dispatching to its listeners.
    Fired {
        /// Instrumentation id of the button.
        source: &'a str,
    },
    /// A sticky toggle button is flipping its shared value.
    Toggled {
        /// Instrumentation id of the button.
        source: &'a str,
        /// Value before the toggle.
        old: &'a dyn fmt::Debug,
        /// Value after the toggle.
        new: &'a dyn fmt::Debug,
    },
    /// A radio group member is writing its value to the shared selection.
    Selected {
        /// Instrumentation id of the member.
        source: &'a str,
        /// The value being selected.
        value: &'a dyn fmt::Debug,
    },
    /// A momentary button is switching on.
    Pressed {
        /// Instrumentation id of the button.
        source: &'a str,
    },
    /// A momentary button is switching off.
    Released {
        /// Instrumentation id of the button.
        source: &'a str,
    },
}

impl ButtonEvent<'_> {
    /// Returns the instrumentation id of the emitting button.
    #[must_use]
    pub fn source(&self) -> &str {
        match *self {
            Self::Fired { source }
            | Self::Toggled { source, .. }
            | Self::Selected { source, .. }
            | Self::Pressed { source }
            | Self::Released { source } => source,
        }
    }

    /// Returns the event name recorded by sinks.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fired { .. } => "fired",
            Self::Toggled { .. } => "toggled",
            Self::Selected { .. } => "selected",
            Self::Pressed { .. } => "pressed",
            Self::Released { .. } => "released",
        }
    }
}

/// A sink receiving start/end brackets around button actions.
pub trait Instrumentation {
    /// Called before the model mutates any shared state.
    fn start(&self, event: &ButtonEvent<'_>) -> EventId;

    /// Called after the action identified by `id` completed.
    fn end(&self, id: EventId);
}

/// A sink that records nothing. This is the default.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoInstrumentation;

impl Instrumentation for NoInstrumentation {
    fn start(&self, _event: &ButtonEvent<'_>) -> EventId {
        EventId(0)
    }

    fn end(&self, _id: EventId) {}
}

/// One entry recorded by an [`EventLog`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEntry {
    /// A bracket was opened.
    Start {
        /// Bracket id.
        id: EventId,
        /// Event name, see [`ButtonEvent::name`].
        name: &'static str,
        /// Instrumentation id of the button.
        source: String,
        /// Debug rendering of the event payload; empty when there is none.
        detail: String,
    },
    /// A bracket was closed.
    End {
        /// Bracket id.
        id: EventId,
    },
}

/// An in-memory sink that keeps every start and end in order.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: RefCell<Vec<LogEntry>>,
    next_id: Cell<u64>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Returns `(name, source)` for every opened bracket, in order.
    #[must_use]
    pub fn started(&self) -> Vec<(&'static str, String)> {
        self.entries
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                LogEntry::Start { name, source, .. } => Some((*name, source.clone())),
                LogEntry::End { .. } => None,
            })
            .collect()
    }

    /// Returns `true` if every bracket was closed, innermost first.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let mut open = Vec::new();
        for entry in self.entries.borrow().iter() {
            match entry {
                LogEntry::Start { id, .. } => open.push(*id),
                LogEntry::End { id } => {
                    if open.pop() != Some(*id) {
                        return false;
                    }
                }
            }
        }
        open.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Instrumentation for EventLog {
    fn start(&self, event: &ButtonEvent<'_>) -> EventId {
        let id = EventId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        let detail = match *event {
            ButtonEvent::Toggled { old, new, .. } => format!("{old:?} -> {new:?}"),
            ButtonEvent::Selected { value, .. } => format!("{value:?}"),
            ButtonEvent::Fired { .. } | ButtonEvent::Pressed { .. } | ButtonEvent::Released { .. } => {
                String::new()
            }
        };
        self.entries.borrow_mut().push(LogEntry::Start {
            id,
            name: event.name(),
            source: event.source().to_string(),
            detail,
        });
        id
    }

    fn end(&self, id: EventId) {
        self.entries.borrow_mut().push(LogEntry::End { id });
    }
}

/// A sink that emits every bracket as a `tracing` event at `DEBUG` level.
#[derive(Debug, Default)]
pub struct TracingInstrumentation {
    next_id: Cell<u64>,
}

impl TracingInstrumentation {
    /// Creates a sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Instrumentation for TracingInstrumentation {
    fn start(&self, event: &ButtonEvent<'_>) -> EventId {
        let id = EventId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        match *event {
            ButtonEvent::Toggled { source, old, new } => {
                tracing::debug!(id = id.0, source, ?old, ?new, "toggled");
            }
            ButtonEvent::Selected { source, value } => {
                tracing::debug!(id = id.0, source, ?value, "selected");
            }
            ButtonEvent::Fired { source }
            | ButtonEvent::Pressed { source }
            | ButtonEvent::Released { source } => {
                tracing::debug!(id = id.0, source, event = event.name(), "start");
            }
        }
        id
    }

    fn end(&self, id: EventId) {
        tracing::debug!(id = id.0, "end");
    }
}
