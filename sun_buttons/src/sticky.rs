// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sticky toggle button: latches down on one press, pops up on the next.
//!
//! The button toggles its shared value *on press* so it responds
//! immediately, and pops back up on the *release* of a later gesture. The
//! release latch (`armed_to_release`) keeps a single press/release gesture
//! from toggling twice:
//!
//! - Press over an enabled button while the value is up: toggle to down and
//!   disarm the latch.
//! - Release over an enabled button while the value is down: if armed, toggle
//!   back up; otherwise arm (this absorbs the release belonging to the press
//!   that latched the button down).
//! - Release with the pointer off the button: arm, so the next full cycle pops
//!   the button up.
//! - Enabling the button: arm.
//!
//! ```
//! use sun_buttons::{StickyToggleButtonModel, StickyToggleOptions};
//! use sun_property::Property;
//!
//! let playing = Property::new(false);
//! let button = StickyToggleButtonModel::new(false, true, playing.clone(), StickyToggleOptions::default());
//!
//! button.set_over(true);
//! button.set_down(true).unwrap();
//! assert!(playing.get()); // toggled on press
//! button.set_down(false).unwrap();
//! assert!(playing.get()); // same gesture, stays down
//!
//! button.set_down(true).unwrap();
//! button.set_down(false).unwrap();
//! assert!(!playing.get()); // second gesture pops it up
//! ```

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use sun_property::Property;

use crate::error::ButtonError;
use crate::instrument::{ButtonEvent, Instrumentation};
use crate::interaction::{ButtonInteraction, Edge, InteractionState};
use crate::model::{ButtonContext, ButtonModel};
use crate::options::{LatchResetPolicy, StickyToggleOptions};
use crate::resource::ResourceList;

/// Interaction model of a two-valued sticky toggle button.
pub struct StickyToggleButtonModel<T: 'static> {
    interaction: ButtonInteraction,
    value_up: T,
    value_down: T,
    value: Property<T>,
    armed_to_release: Cell<bool>,
    options: StickyToggleOptions,
    resources: RefCell<ResourceList>,
    instrumentation: Rc<dyn Instrumentation>,
    disposed: Cell<bool>,
}

impl<T> StickyToggleButtonModel<T>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
{
    /// Creates a model toggling `value` between `value_up` and `value_down`.
    #[must_use]
    pub fn new(value_up: T, value_down: T, value: Property<T>, options: StickyToggleOptions) -> Rc<Self> {
        Self::new_in(value_up, value_down, value, options, ButtonContext::default())
    }

    /// Creates a model wired to `context`.
    #[must_use]
    pub fn new_in(
        value_up: T,
        value_down: T,
        value: Property<T>,
        options: StickyToggleOptions,
        context: ButtonContext,
    ) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let mut resources = ResourceList::new();
            resources.push(context.enabled.lazy_link(move |_, _| {
                if let Some(model) = weak.upgrade() {
                    model.on_enabled_changed();
                }
            }));

            let armed = context.enabled.get();
            Self {
                interaction: ButtonInteraction::new(context.enabled),
                value_up,
                value_down,
                value,
                armed_to_release: Cell::new(armed),
                options,
                resources: RefCell::new(resources),
                instrumentation: context.instrumentation,
                disposed: Cell::new(false),
            }
        })
    }

    /// Returns the value while the button is popped up.
    #[must_use]
    pub fn value_up(&self) -> &T {
        &self.value_up
    }

    /// Returns the value while the button is latched down.
    #[must_use]
    pub fn value_down(&self) -> &T {
        &self.value_down
    }

    /// Returns the shared value property.
    #[must_use]
    pub fn value_property(&self) -> &Property<T> {
        &self.value
    }

    /// Returns the options the model was built with.
    #[must_use]
    pub fn options(&self) -> &StickyToggleOptions {
        &self.options
    }

    /// Returns the pointer and enabled state.
    #[must_use]
    pub fn interaction(&self) -> &ButtonInteraction {
        &self.interaction
    }

    /// Returns `true` if the next release over the button pops it up.
    #[must_use]
    pub fn is_armed_to_release(&self) -> bool {
        self.armed_to_release.get()
    }

    /// Returns `true` while the shared value equals the down value.
    #[must_use]
    pub fn is_latched_down(&self) -> bool {
        self.value.with(|value| *value == self.value_down)
    }

    /// Returns the appearance state; a latched button reads as pressed.
    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        match (self.is_latched_down(), self.interaction.is_enabled()) {
            (true, true) => InteractionState::Pressed,
            (true, false) => InteractionState::DisabledPressed,
            (false, _) => self.interaction.state(),
        }
    }

    /// Records whether the pointer is over the button.
    pub fn set_over(&self, over: bool) {
        self.interaction.set_over(over);
    }

    /// Records whether the pointer is pressed and applies the latch rules.
    pub fn set_down(&self, down: bool) -> Result<(), ButtonError> {
        self.ensure_live()?;
        let Some(edge) = self.interaction.set_down(down) else {
            return Ok(());
        };
        let over = self.interaction.is_over();

        if over && self.interaction.is_enabled() {
            match edge {
                Edge::Press if self.value.with(|value| *value == self.value_up) => {
                    self.toggle()?;
                    self.armed_to_release.set(false);
                }
                Edge::Release if self.is_latched_down() => {
                    if self.armed_to_release.get() {
                        self.toggle()?;
                    } else {
                        self.armed_to_release.set(true);
                    }
                }
                Edge::Press | Edge::Release => {}
            }
        }

        if edge == Edge::Release && !over {
            self.armed_to_release.set(true);
        }
        Ok(())
    }

    /// Flips the shared value between the up and down values.
    ///
    /// Fails with [`ButtonError::ValueOutOfRange`] if the shared value is
    /// neither; the value is left untouched.
    pub fn toggle(&self) -> Result<(), ButtonError> {
        self.ensure_live()?;
        let old = self.value.get();
        let new = if old == self.value_up {
            self.value_down.clone()
        } else if old == self.value_down {
            self.value_up.clone()
        } else {
            tracing::warn!(
                source = self.options.phetio_id.as_str(),
                value = ?old,
                "toggle value is neither up nor down"
            );
            return Err(ButtonError::ValueOutOfRange);
        };

        let id = self.instrumentation.start(&ButtonEvent::Toggled {
            source: &self.options.phetio_id,
            old: &old,
            new: &new,
        });
        tracing::trace!(source = self.options.phetio_id.as_str(), ?old, ?new, "toggle");
        self.value.set(new);
        self.instrumentation.end(id);
        Ok(())
    }

    /// Applies the configured [`LatchResetPolicy`]; the shared value is not touched.
    pub fn reset(&self) {
        match self.options.latch_reset {
            LatchResetPolicy::Preserve => {}
            LatchResetPolicy::Rearm => self.armed_to_release.set(true),
        }
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

    fn on_enabled_changed(&self) {
        if self.interaction.is_enabled() {
            self.armed_to_release.set(true);
        }
    }

    fn ensure_live(&self) -> Result<(), ButtonError> {
        if self.disposed.get() {
            tracing::warn!(source = self.options.phetio_id.as_str(), "sticky toggle used after dispose");
            return Err(ButtonError::Disposed);
        }
        Ok(())
    }
}

impl<T> ButtonModel for StickyToggleButtonModel<T>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
{
    fn interaction(&self) -> &ButtonInteraction {
        &self.interaction
    }

    fn set_down(&self, down: bool) -> Result<(), ButtonError> {
        Self::set_down(self, down)
    }

    /// Toggles the value, as keyboard activation does.
    fn fire(&self) -> Result<(), ButtonError> {
        self.toggle()
    }

    fn dispose(&self) {
        Self::dispose(self);
    }

    fn is_disposed(&self) -> bool {
        Self::is_disposed(self)
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for StickyToggleButtonModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickyToggleButtonModel")
            .field("interaction", &self.interaction)
            .field("value_up", &self.value_up)
            .field("value_down", &self.value_down)
            .field("value", &self.value)
            .field("armed_to_release", &self.armed_to_release.get())
            .field("options", &self.options)
            .field("disposed", &self.disposed.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Mode {
        Off,
        On,
        Broken,
    }

    fn model() -> (Property<Mode>, Rc<StickyToggleButtonModel<Mode>>) {
        let value = Property::new(Mode::Off);
        let model = StickyToggleButtonModel::new(
            Mode::Off,
            Mode::On,
            value.clone(),
            StickyToggleOptions::default(),
        );
        (value, model)
    }

    #[test]
    fn starts_armed_when_enabled() {
        let (_, model) = model();
        assert!(model.is_armed_to_release());
    }

    #[test]
    fn starts_disarmed_when_disabled() {
        let model = StickyToggleButtonModel::new_in(
            false,
            true,
            Property::new(false),
            StickyToggleOptions::default(),
            ButtonContext::default().with_enabled(Property::new(false)),
        );
        assert!(!model.is_armed_to_release());
    }

    #[test]
    fn press_toggles_and_disarms() {
        let (value, model) = model();
        model.set_over(true);
        model.set_down(true).unwrap();
        assert_eq!(value.get(), Mode::On);
        assert!(!model.is_armed_to_release());
        assert_eq!(model.interaction_state(), InteractionState::Pressed);
    }

    #[test]
    fn first_release_only_arms() {
        let (value, model) = model();
        model.set_over(true);
        model.set_down(true).unwrap();
        model.set_down(false).unwrap();
        assert_eq!(value.get(), Mode::On);
        assert!(model.is_armed_to_release());
    }

    #[test]
    fn press_while_latched_does_not_toggle() {
        let (value, model) = model();
        model.set_over(true);
        model.set_down(true).unwrap();
        model.set_down(false).unwrap();
        model.set_down(true).unwrap();
        assert_eq!(value.get(), Mode::On);
        model.set_down(false).unwrap();
        assert_eq!(value.get(), Mode::Off);
    }

    #[test]
    fn re_enable_arms_latch() {
        let enabled = Property::new(true);
        let model = StickyToggleButtonModel::new_in(
            false,
            true,
            Property::new(false),
            StickyToggleOptions::default(),
            ButtonContext::default().with_enabled(enabled.clone()),
        );
        model.set_over(true);
        model.set_down(true).unwrap();
        assert!(!model.is_armed_to_release());

        enabled.set(false);
        assert!(!model.is_armed_to_release());
        assert_eq!(model.interaction_state(), InteractionState::DisabledPressed);
        enabled.set(true);
        assert!(model.is_armed_to_release());

        // The release of the first press now pops the button up.
        model.set_down(false).unwrap();
        assert!(!model.value_property().get());
    }

    #[test]
    fn toggle_flips_both_ways() {
        let (value, model) = model();
        model.toggle().unwrap();
        assert_eq!(value.get(), Mode::On);
        model.toggle().unwrap();
        assert_eq!(value.get(), Mode::Off);
    }

    #[test]
    fn toggle_rejects_foreign_value() {
        let (value, model) = model();
        value.set(Mode::Broken);
        assert_eq!(model.toggle(), Err(ButtonError::ValueOutOfRange));
        assert_eq!(value.get(), Mode::Broken);
    }

    #[test]
    fn foreign_value_is_never_toggled_by_pointer() {
        let (value, model) = model();
        value.set(Mode::Broken);
        model.set_over(true);
        model.set_down(true).unwrap();
        model.set_down(false).unwrap();
        assert_eq!(value.get(), Mode::Broken);
    }

    #[test]
    fn reset_respects_policy() {
        let (_, preserve) = model();
        preserve.set_over(true);
        preserve.set_down(true).unwrap();
        preserve.reset();
        assert!(!preserve.is_armed_to_release());

        let rearm = StickyToggleButtonModel::new(
            Mode::Off,
            Mode::On,
            Property::new(Mode::Off),
            StickyToggleOptions::default().with_latch_reset(LatchResetPolicy::Rearm),
        );
        rearm.set_over(true);
        rearm.set_down(true).unwrap();
        rearm.reset();
        assert!(rearm.is_armed_to_release());
    }

    #[test]
    fn dispose_unlinks_enabled() {
        let enabled = Property::new(true);
        let model = StickyToggleButtonModel::new_in(
            0_u8,
            1_u8,
            Property::new(0),
            StickyToggleOptions::default(),
            ButtonContext::default().with_enabled(enabled.clone()),
        );
        assert_eq!(enabled.observer_count(), 1);
        model.dispose();
        model.dispose();
        assert_eq!(enabled.observer_count(), 0);
        assert_eq!(model.toggle(), Err(ButtonError::Disposed));
    }
}
