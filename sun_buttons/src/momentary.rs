// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Momentary button: on while pressed, off when released.
//!
//! Disabling the button while it is on switches it off.

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use sun_property::Property;

use crate::error::ButtonError;
use crate::instrument::{ButtonEvent, Instrumentation};
use crate::interaction::{ButtonInteraction, Edge, InteractionState};
use crate::model::{ButtonContext, ButtonModel};
use crate::options::MomentaryOptions;
use crate::resource::ResourceList;

/// Interaction model of a momentary button driving a shared on/off property.
pub struct MomentaryButtonModel {
    interaction: ButtonInteraction,
    on: Property<bool>,
    options: MomentaryOptions,
    resources: RefCell<ResourceList>,
    instrumentation: Rc<dyn Instrumentation>,
    disposed: Cell<bool>,
}

impl MomentaryButtonModel {
    /// Creates a model driving `on`.
    #[must_use]
    pub fn new(on: Property<bool>, options: MomentaryOptions) -> Rc<Self> {
        Self::new_in(on, options, ButtonContext::default())
    }

    /// Creates a model wired to `context`.
    #[must_use]
    pub fn new_in(on: Property<bool>, options: MomentaryOptions, context: ButtonContext) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let mut resources = ResourceList::new();
            resources.push(context.enabled.lazy_link(move |_, _| {
                if let Some(model) = weak.upgrade() {
                    model.on_enabled_changed();
                }
            }));

            Self {
                interaction: ButtonInteraction::new(context.enabled),
                on,
                options,
                resources: RefCell::new(resources),
                instrumentation: context.instrumentation,
                disposed: Cell::new(false),
            }
        })
    }

    /// Returns the shared on/off property.
    #[must_use]
    pub fn on_property(&self) -> &Property<bool> {
        &self.on
    }

    /// Returns `true` while the button is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on.get()
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

    /// Records whether the pointer is over the button.
    pub fn set_over(&self, over: bool) {
        self.interaction.set_over(over);
    }

    /// Records whether the pointer is pressed; press switches on, release switches off.
    pub fn set_down(&self, down: bool) -> Result<(), ButtonError> {
        self.ensure_live()?;
        match self.interaction.set_down(down) {
            Some(Edge::Press) => self.switch(true),
            Some(Edge::Release) => self.switch(false),
            None => {}
        }
        Ok(())
    }

    /// Switches on and immediately off again, as keyboard activation does.
    ///
    /// Does nothing if the button is disabled.
    pub fn fire(&self) -> Result<(), ButtonError> {
        self.ensure_live()?;
        if self.interaction.is_enabled() {
            self.switch(true);
            self.switch(false);
        }
        Ok(())
    }

    /// Releases the enabled subscription. Later calls do nothing.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.resources.borrow_mut().release();
    }

    /// Returns `true` once [`dispose`](Self::dispose) ran.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    fn switch(&self, on: bool) {
        if self.on.get() == on {
            return;
        }
        let source = self.options.phetio_id.as_str();
        let event = if on {
            ButtonEvent::Pressed { source }
        } else {
            ButtonEvent::Released { source }
        };
        let id = self.instrumentation.start(&event);
        self.on.set(on);
        self.instrumentation.end(id);
    }

    fn on_enabled_changed(&self) {
        if !self.interaction.is_enabled() {
            self.switch(false);
        }
    }

    fn ensure_live(&self) -> Result<(), ButtonError> {
        if self.disposed.get() {
            tracing::warn!(source = self.options.phetio_id.as_str(), "momentary button used after dispose");
            return Err(ButtonError::Disposed);
        }
        Ok(())
    }
}

impl ButtonModel for MomentaryButtonModel {
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

impl fmt::Debug for MomentaryButtonModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MomentaryButtonModel")
            .field("interaction", &self.interaction)
            .field("on", &self.on)
            .field("options", &self.options)
            .field("disposed", &self.disposed.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::EventLog;
    use alloc::string::String;

    #[test]
    fn on_while_pressed() {
        let on = Property::new(false);
        let model = MomentaryButtonModel::new(on.clone(), MomentaryOptions::default());
        model.set_over(true);
        model.set_down(true).unwrap();
        assert!(on.get());
        model.set_over(false);
        assert!(on.get());
        model.set_down(false).unwrap();
        assert!(!on.get());
    }

    #[test]
    fn disable_switches_off() {
        let enabled = Property::new(true);
        let on = Property::new(false);
        let model = MomentaryButtonModel::new_in(
            on.clone(),
            MomentaryOptions::default(),
            ButtonContext::default().with_enabled(enabled.clone()),
        );
        model.set_over(true);
        model.set_down(true).unwrap();
        enabled.set(false);
        assert!(!model.is_on());
        model.set_down(false).unwrap();
        assert!(!on.get());
    }

    #[test]
    fn reverted_disable_keeps_button_on() {
        let enabled = Property::new(true);
        let handle = enabled.clone();
        let _keep_enabled = enabled.lazy_link(move |_, &now| {
            if !now {
                handle.set(true);
            }
        });
        let model = MomentaryButtonModel::new_in(
            Property::new(false),
            MomentaryOptions::default(),
            ButtonContext::default().with_enabled(enabled.clone()),
        );
        model.set_over(true);
        model.set_down(true).unwrap();
        enabled.set(false);
        assert!(enabled.get());
        assert!(model.is_on());
    }

    #[test]
    fn fire_pulses_with_brackets() {
        let log = Rc::new(EventLog::new());
        let model = MomentaryButtonModel::new_in(
            Property::new(false),
            MomentaryOptions::default().with_phetio_id("beam"),
            ButtonContext::default().with_instrumentation(log.clone()),
        );
        model.fire().unwrap();
        assert!(!model.is_on());
        assert!(log.is_balanced());
        assert_eq!(
            log.started(),
            [
                ("pressed", String::from("beam")),
                ("released", String::from("beam"))
            ]
        );
    }

    #[test]
    fn dispose_unlinks() {
        let enabled = Property::new(true);
        let model = MomentaryButtonModel::new_in(
            Property::new(false),
            MomentaryOptions::default(),
            ButtonContext::default().with_enabled(enabled.clone()),
        );
        model.dispose();
        assert_eq!(enabled.observer_count(), 0);
        assert_eq!(model.set_down(true), Err(ButtonError::Disposed));
    }
}
