// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radio group members sharing one selection property.
//!
//! Each member writes its own fixed value into the shared selection when it
//! fires. Members never talk to each other: a member is selected exactly when
//! `selection == selected_value`, so whichever member fired last wins and
//! every other member reads as deselected.
//!
//! ```
//! use sun_buttons::{ButtonContext, RadioGroup};
//! use sun_property::Property;
//!
//! let speed = Property::new("normal");
//! let group = RadioGroup::new(
//!     speed.clone(),
//!     ["slow", "normal", "fast"],
//!     "speedRadioButtonGroup",
//!     ButtonContext::default(),
//! )
//! .unwrap();
//!
//! let fast = group.member_for(&"fast").unwrap();
//! fast.set_over(true);
//! fast.set_down(true).unwrap();
//! fast.set_down(false).unwrap();
//!
//! assert_eq!(speed.get(), "fast");
//! assert_eq!(group.selected_index(), Some(2));
//! ```

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use sun_property::Property;

use crate::error::ButtonError;
use crate::instrument::{ButtonEvent, Instrumentation};
use crate::interaction::{ButtonInteraction, Edge, RadioInteractionState};
use crate::model::{ButtonContext, ButtonModel};
use crate::options::RadioOptions;

/// Interaction model of one radio button.
pub struct RadioGroupMemberModel<T: 'static> {
    interaction: ButtonInteraction,
    selected_value: T,
    selection: Property<T>,
    options: RadioOptions,
    instrumentation: Rc<dyn Instrumentation>,
    disposed: Cell<bool>,
}

impl<T> RadioGroupMemberModel<T>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
{
    /// Creates a member that selects `selected_value` in `selection`.
    #[must_use]
    pub fn new(selection: Property<T>, selected_value: T, options: RadioOptions) -> Rc<Self> {
        Self::new_in(selection, selected_value, options, ButtonContext::default())
    }

    /// Creates a member wired to `context`.
    #[must_use]
    pub fn new_in(
        selection: Property<T>,
        selected_value: T,
        options: RadioOptions,
        context: ButtonContext,
    ) -> Rc<Self> {
        Rc::new(Self {
            interaction: ButtonInteraction::new(context.enabled),
            selected_value,
            selection,
            options,
            instrumentation: context.instrumentation,
            disposed: Cell::new(false),
        })
    }

    /// Returns the value this member selects.
    #[must_use]
    pub fn selected_value(&self) -> &T {
        &self.selected_value
    }

    /// Returns the shared selection property.
    #[must_use]
    pub fn selection(&self) -> &Property<T> {
        &self.selection
    }

    /// Returns the options the member was built with.
    #[must_use]
    pub fn options(&self) -> &RadioOptions {
        &self.options
    }

    /// Returns the pointer and enabled state.
    #[must_use]
    pub fn interaction(&self) -> &ButtonInteraction {
        &self.interaction
    }

    /// Returns `true` if the shared selection holds this member's value.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selection.with(|selection| *selection == self.selected_value)
    }

    /// Returns the appearance state.
    #[must_use]
    pub fn interaction_state(&self) -> RadioInteractionState {
        let selected = self.is_selected();
        if !self.interaction.is_enabled() {
            return if selected {
                RadioInteractionState::DisabledSelected
            } else {
                RadioInteractionState::DisabledDeselected
            };
        }
        if selected {
            RadioInteractionState::Selected
        } else if self.interaction.is_over() && self.interaction.is_down() {
            RadioInteractionState::Pressed
        } else if self.interaction.is_over() {
            RadioInteractionState::Over
        } else {
            RadioInteractionState::Deselected
        }
    }

    /// Records whether the pointer is over the button.
    pub fn set_over(&self, over: bool) {
        self.interaction.set_over(over);
    }

    /// Records whether the pointer is pressed; a release over the button fires.
    pub fn set_down(&self, down: bool) -> Result<(), ButtonError> {
        self.ensure_live()?;
        if self.interaction.set_down(down) == Some(Edge::Release) && self.interaction.is_over() {
            self.fire()?;
        }
        Ok(())
    }

    /// Writes this member's value into the shared selection.
    ///
    /// Does nothing (successfully) if the member is disabled or already selected.
    pub fn fire(&self) -> Result<(), ButtonError> {
        self.ensure_live()?;
        if !self.interaction.is_enabled() || self.is_selected() {
            return Ok(());
        }
        let id = self.instrumentation.start(&ButtonEvent::Selected {
            source: &self.options.phetio_id,
            value: &self.selected_value,
        });
        tracing::trace!(
            source = self.options.phetio_id.as_str(),
            value = ?self.selected_value,
            "select"
        );
        self.selection.set(self.selected_value.clone());
        self.instrumentation.end(id);
        Ok(())
    }

    /// Marks the member disposed. Later calls do nothing.
    pub fn dispose(&self) {
        self.disposed.set(true);
    }

    /// Returns `true` once [`dispose`](Self::dispose) ran.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    fn ensure_live(&self) -> Result<(), ButtonError> {
        if self.disposed.get() {
            tracing::warn!(source = self.options.phetio_id.as_str(), "radio member used after dispose");
            return Err(ButtonError::Disposed);
        }
        Ok(())
    }
}

impl<T> ButtonModel for RadioGroupMemberModel<T>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
{
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

impl<T: fmt::Debug + 'static> fmt::Debug for RadioGroupMemberModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioGroupMemberModel")
            .field("interaction", &self.interaction)
            .field("selected_value", &self.selected_value)
            .field("selection", &self.selection)
            .field("options", &self.options)
            .field("disposed", &self.disposed.get())
            .finish_non_exhaustive()
    }
}

/// A set of radio members over one selection and one enabled flag.
///
/// Member `i` is given the instrumentation id `"{group_id}.{i}"` (or an empty
/// id when `group_id` is empty).
pub struct RadioGroup<T: 'static> {
    selection: Property<T>,
    enabled: Property<bool>,
    members: Vec<Rc<RadioGroupMemberModel<T>>>,
}

impl<T> RadioGroup<T>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
{
    /// Builds one member per value.
    ///
    /// Fails with [`ButtonError::DuplicateRadioValue`] if two values are equal,
    /// since such members could never be told apart.
    pub fn new(
        selection: Property<T>,
        values: impl IntoIterator<Item = T>,
        group_id: &str,
        context: ButtonContext,
    ) -> Result<Self, ButtonError> {
        let values: Vec<T> = values.into_iter().collect();
        for (idx, value) in values.iter().enumerate() {
            if values[..idx].contains(value) {
                tracing::warn!(group = group_id, ?value, "duplicate radio value");
                return Err(ButtonError::DuplicateRadioValue);
            }
        }

        let members = values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| {
                let phetio_id = if group_id.is_empty() {
                    String::new()
                } else {
                    format!("{group_id}.{idx}")
                };
                RadioGroupMemberModel::new_in(
                    selection.clone(),
                    value,
                    RadioOptions { phetio_id },
                    context.clone(),
                )
            })
            .collect();

        Ok(Self {
            selection,
            enabled: context.enabled,
            members,
        })
    }

    /// Returns the shared selection property.
    #[must_use]
    pub fn selection(&self) -> &Property<T> {
        &self.selection
    }

    /// Returns the enabled flag shared by all members.
    #[must_use]
    pub fn enabled_property(&self) -> &Property<bool> {
        &self.enabled
    }

    /// Returns the members in construction order.
    #[must_use]
    pub fn members(&self) -> &[Rc<RadioGroupMemberModel<T>>] {
        &self.members
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the member that selects `value`.
    #[must_use]
    pub fn member_for(&self, value: &T) -> Option<&Rc<RadioGroupMemberModel<T>>> {
        self.members
            .iter()
            .find(|member| member.selected_value() == value)
    }

    /// Returns the index of the selected member, if the selection matches one.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.members.iter().position(|member| member.is_selected())
    }

    /// Disposes every member.
    pub fn dispose(&self) {
        for member in &self.members {
            member.dispose();
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for RadioGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioGroup")
            .field("selection", &self.selection)
            .field("enabled", &self.enabled)
            .field("members", &self.members.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(member: &RadioGroupMemberModel<u8>) {
        member.set_over(true);
        member.set_down(true).unwrap();
        member.set_down(false).unwrap();
    }

    #[test]
    fn release_over_selects() {
        let selection = Property::new(0_u8);
        let member = RadioGroupMemberModel::new(selection.clone(), 3, RadioOptions::default());
        click(&member);
        assert_eq!(selection.get(), 3);
        assert!(member.is_selected());
        assert_eq!(member.interaction_state(), RadioInteractionState::Selected);
    }

    #[test]
    fn release_off_button_does_not_select() {
        let selection = Property::new(0_u8);
        let member = RadioGroupMemberModel::new(selection.clone(), 3, RadioOptions::default());
        member.set_over(true);
        member.set_down(true).unwrap();
        assert_eq!(member.interaction_state(), RadioInteractionState::Pressed);
        member.set_over(false);
        member.set_down(false).unwrap();
        assert_eq!(selection.get(), 0);
    }

    #[test]
    fn press_alone_does_not_select() {
        let selection = Property::new(0_u8);
        let member = RadioGroupMemberModel::new(selection.clone(), 3, RadioOptions::default());
        member.set_over(true);
        member.set_down(true).unwrap();
        assert_eq!(selection.get(), 0);
    }

    #[test]
    fn disabled_fire_is_noop() {
        let selection = Property::new(0_u8);
        let member = RadioGroupMemberModel::new_in(
            selection.clone(),
            3,
            RadioOptions::default(),
            ButtonContext::default().with_enabled(Property::new(false)),
        );
        assert_eq!(member.fire(), Ok(()));
        assert_eq!(selection.get(), 0);
        assert_eq!(
            member.interaction_state(),
            RadioInteractionState::DisabledDeselected
        );
    }

    #[test]
    fn refire_when_selected_does_not_notify() {
        let selection = Property::new(3_u8);
        let notified = Rc::new(Cell::new(0));
        let seen = notified.clone();
        let _sub = selection.lazy_link(move |_, _| seen.set(seen.get() + 1));
        let member = RadioGroupMemberModel::new(selection.clone(), 3, RadioOptions::default());
        member.fire().unwrap();
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn duplicate_values_rejected() {
        let result = RadioGroup::new(Property::new(1_u8), [1, 2, 1], "g", ButtonContext::default());
        assert_eq!(result.err(), Some(ButtonError::DuplicateRadioValue));
    }

    #[test]
    fn group_ids_follow_index() {
        let group = RadioGroup::new(Property::new(1_u8), [1, 2], "g", ButtonContext::default()).unwrap();
        assert_eq!(group.members()[1].options().phetio_id, "g.1");

        let anonymous = RadioGroup::new(Property::new(1_u8), [1, 2], "", ButtonContext::default()).unwrap();
        assert!(anonymous.members()[0].options().phetio_id.is_empty());
    }

    #[test]
    fn group_dispose_disposes_members() {
        let group = RadioGroup::new(Property::new(1_u8), [1, 2], "g", ButtonContext::default()).unwrap();
        group.dispose();
        assert!(group.members().iter().all(|m| m.is_disposed()));
        assert_eq!(group.members()[1].fire(), Err(ButtonError::Disposed));
    }
}
