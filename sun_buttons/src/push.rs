// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Push button: fires listeners on release (or press), optionally repeating while held.
//!
//! ## Firing rules
//!
//! - Press: if [`fire_on_down`](PushButtonOptions::fire_on_down) is set, fire
//!   immediately. If [`fire_on_hold`](PushButtonOptions::fire_on_hold) is set,
//!   start the hold timer.
//! - Release: the button "should fire" if it fires on release, the pointer is
//!   still over it, and it is enabled. Without a hold timer that decides the
//!   fire. With one, the timer is stopped and fires a final time only if it
//!   never fired during this hold, so a hold that already repeated does not
//!   add an extra fire on release.
//! - Disabling the button stops the hold timer without a final fire.
//!   Re-enabling it does not restart the timer.
//!
//! The hold timer is driven by [`PushButtonModel::step`]; the host calls it
//! with the frame's elapsed time.
//!
//! ## Minimal example
//!
//! ```
//! use core::cell::Cell;
//! use core::time::Duration;
//! use std::rc::Rc;
//! use sun_buttons::{PushButtonModel, PushButtonOptions};
//!
//! let button = PushButtonModel::new(PushButtonOptions::default().with_fire_on_hold(true)).unwrap();
//! let count = Rc::new(Cell::new(0));
//! let seen = count.clone();
//! button.add_listener(Rc::new(move || seen.set(seen.get() + 1)));
//!
//! button.set_over(true);
//! button.set_down(true).unwrap();
//! for _ in 0..13 {
//!     button.step(Duration::from_millis(50)).unwrap();
//! }
//! button.set_down(false).unwrap();
//!
//! // Repeats at 400, 500 and 600 ms; the release adds nothing.
//! assert_eq!(count.get(), 3);
//! ```

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;
use core::time::Duration;

use smallvec::SmallVec;
use sun_property::Property;
use sun_timing::CallbackTimer;

use crate::error::{ButtonError, OptionsError};
use crate::instrument::{ButtonEvent, Instrumentation};
use crate::interaction::{ButtonInteraction, Edge, InteractionState};
use crate::model::{ButtonContext, ButtonModel};
use crate::options::PushButtonOptions;
use crate::resource::ResourceList;

/// A zero-argument callback run when a push button fires.
///
/// Listeners are compared by identity ([`Rc::ptr_eq`]). A listener that needs
/// the model should capture a [`Weak`] handle to avoid a reference cycle.
pub type Listener = Rc<dyn Fn()>;

/// Most buttons have one or two listeners.
const INLINE_LISTENERS: usize = 2;

/// Interaction model of a push button.
pub struct PushButtonModel {
    interaction: ButtonInteraction,
    options: PushButtonOptions,
    /// `true` only while listeners are being dispatched.
    firing: Property<bool>,
    listeners: RefCell<SmallVec<[Listener; INLINE_LISTENERS]>>,
    timer: RefCell<Option<CallbackTimer>>,
    resources: RefCell<ResourceList>,
    instrumentation: Rc<dyn Instrumentation>,
    disposed: Cell<bool>,
}

impl PushButtonModel {
    /// Creates a model with its own enabled flag and no instrumentation.
    pub fn new(options: PushButtonOptions) -> Result<Rc<Self>, ButtonError> {
        Self::new_in(options, ButtonContext::default())
    }

    /// Creates a model wired to `context`.
    ///
    /// Fails with [`ButtonError::InvalidOptions`] if `options` do not validate.
    pub fn new_in(options: PushButtonOptions, context: ButtonContext) -> Result<Rc<Self>, ButtonError> {
        options.validate()?;
        let timer = if options.fire_on_hold {
            let timer = CallbackTimer::new(options.fire_on_hold_delay, options.fire_on_hold_interval)
                .map_err(|_| OptionsError::ZeroHoldInterval)?;
            Some(timer)
        } else {
            None
        };

        Ok(Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let mut resources = ResourceList::new();
            resources.push(context.enabled.lazy_link(move |_, _| {
                if let Some(model) = weak.upgrade() {
                    model.on_enabled_changed();
                }
            }));

            Self {
                interaction: ButtonInteraction::new(context.enabled),
                options,
                firing: Property::new(false),
                listeners: RefCell::new(SmallVec::new()),
                timer: RefCell::new(timer),
                resources: RefCell::new(resources),
                instrumentation: context.instrumentation,
                disposed: Cell::new(false),
            }
        }))
    }

    /// Returns the options the model was built with.
    #[must_use]
    pub fn options(&self) -> &PushButtonOptions {
        &self.options
    }

    /// Returns the pointer and enabled state.
    #[must_use]
    pub fn interaction(&self) -> &ButtonInteraction {
        &self.interaction
    }

    /// Returns the appearance state.
    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    /// Returns `true` while listeners are being dispatched.
    #[must_use]
    pub fn is_firing(&self) -> bool {
        self.firing.get()
    }

    /// Returns the observable firing flag.
    ///
    /// Hosts watch it to suppress side effects (sounds, announcements) that
    /// should not happen for programmatic fires.
    #[must_use]
    pub fn firing_property(&self) -> &Property<bool> {
        &self.firing
    }

    /// Returns `true` while the fire-on-hold timer is running.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.timer
            .borrow()
            .as_ref()
            .is_some_and(CallbackTimer::is_running)
    }

    /// Adds `listener` after the existing ones.
    ///
    /// Returns `false` (and changes nothing) if it is already registered.
    pub fn add_listener(&self, listener: Listener) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        if listeners.iter().any(|existing| Rc::ptr_eq(existing, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Removes `listener`.
    ///
    /// Returns `false` (and changes nothing) if it was not registered.
    pub fn remove_listener(&self, listener: &Listener) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|existing| Rc::ptr_eq(existing, listener)) {
            Some(idx) => {
                listeners.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `listener` is registered.
    #[must_use]
    pub fn has_listener(&self, listener: &Listener) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|existing| Rc::ptr_eq(existing, listener))
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Records whether the pointer is over the button.
    pub fn set_over(&self, over: bool) {
        self.interaction.set_over(over);
    }

    /// Records whether the pointer is pressed and applies the firing rules.
    pub fn set_down(&self, down: bool) -> Result<(), ButtonError> {
        self.ensure_live()?;
        match self.interaction.set_down(down) {
            Some(Edge::Press) => {
                if self.options.fire_on_down {
                    self.fire()?;
                }
                // A fire-on-down listener may have disabled the button.
                if self.interaction.is_enabled() {
                    if let Some(timer) = self.timer.borrow_mut().as_mut() {
                        timer.start();
                    }
                }
            }
            Some(Edge::Release) => {
                let should_fire = !self.options.fire_on_down
                    && self.interaction.is_over()
                    && self.interaction.is_enabled();
                let fire = match self.timer.borrow_mut().as_mut() {
                    Some(timer) => timer.stop(should_fire),
                    None => should_fire,
                };
                if fire {
                    self.fire()?;
                }
            }
            None => {}
        }
        Ok(())
    }

    /// Advances the hold timer by `dt` and fires once for every repeat that came due.
    ///
    /// The timer is checked again before each fire, so a listener that
    /// disables or releases the button cancels the remaining repeats.
    pub fn step(&self, dt: Duration) -> Result<(), ButtonError> {
        self.ensure_live()?;
        match self.timer.borrow_mut().as_mut() {
            Some(timer) => timer.advance(dt),
            None => return Ok(()),
        }
        while self.poll_timer() {
            self.fire()?;
        }
        Ok(())
    }

    /// Invokes every listener once, in registration order.
    ///
    /// Listeners run against a snapshot of the listener list: listeners added
    /// or removed during dispatch take effect for the next fire. Fails with
    /// [`ButtonError::AlreadyFiring`] when called from inside a listener of
    /// this button. The instrumentation bracket encloses the changes of the
    /// firing flag as well as the dispatch.
    pub fn fire(&self) -> Result<(), ButtonError> {
        self.ensure_live()?;
        if self.firing.get() {
            tracing::warn!(source = self.options.phetio_id.as_str(), "cannot fire when already firing");
            return Err(ButtonError::AlreadyFiring);
        }
        let id = self.instrumentation.start(&ButtonEvent::Fired {
            source: &self.options.phetio_id,
        });
        self.firing.set(true);

        let snapshot: SmallVec<[Listener; INLINE_LISTENERS]> = self.listeners.borrow().clone();
        tracing::trace!(
            source = self.options.phetio_id.as_str(),
            listeners = snapshot.len(),
            "fire"
        );
        for listener in &snapshot {
            listener();
        }

        self.firing.set(false);
        self.instrumentation.end(id);
        Ok(())
    }

    /// Stops and releases the hold timer, clears listeners, and releases subscriptions.
    ///
    /// A fire in progress is considered finished. Later calls do nothing.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.firing.set(false);
        if let Some(mut timer) = self.timer.borrow_mut().take() {
            timer.stop(false);
        }
        self.listeners.borrow_mut().clear();
        self.resources.borrow_mut().release();
    }

    /// Returns `true` once [`dispose`](Self::dispose) ran.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    fn on_enabled_changed(&self) {
        if self.interaction.is_enabled() {
            return;
        }
        if let Some(timer) = self.timer.borrow_mut().as_mut() {
            if timer.is_running() {
                tracing::trace!(source = self.options.phetio_id.as_str(), "hold timer stopped on disable");
                timer.stop(false);
            }
        }
    }

    fn poll_timer(&self) -> bool {
        self.timer
            .borrow_mut()
            .as_mut()
            .is_some_and(CallbackTimer::poll)
    }

    fn ensure_live(&self) -> Result<(), ButtonError> {
        if self.disposed.get() {
            tracing::warn!(source = self.options.phetio_id.as_str(), "push button used after dispose");
            return Err(ButtonError::Disposed);
        }
        Ok(())
    }
}

impl ButtonModel for PushButtonModel {
    fn interaction(&self) -> &ButtonInteraction {
        &self.interaction
    }

    fn set_down(&self, down: bool) -> Result<(), ButtonError> {
        Self::set_down(self, down)
    }

    fn fire(&self) -> Result<(), ButtonError> {
        Self::fire(self)
    }

    fn dispose(&self) {
        Self::dispose(self);
    }

    fn is_disposed(&self) -> bool {
        Self::is_disposed(self)
    }
}

impl fmt::Debug for PushButtonModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushButtonModel")
            .field("interaction", &self.interaction)
            .field("options", &self.options)
            .field("firing", &self.is_firing())
            .field("listeners", &self.listener_count())
            .field("timer", &self.timer.borrow())
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}
