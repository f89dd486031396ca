// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer interaction flags shared by every button model.
//!
//! The host reports whether the pointer is over the button and whether it is
//! pressed; the enabled flag comes from a shared [`Property<bool>`]. A
//! [`ButtonInteraction`] combines the three and turns raw `down` changes into
//! [`Edge`]s that the concrete models react to.
//!
//! ## Press invariant
//!
//! `down` can only become `true` while the pointer is over the button and the
//! button is enabled. A refused press yields no edge and leaves `down` false.
//! Once pressed, `down` stays `true` if the pointer drags off; the eventual
//! release is always accepted.
//!
//! ```
//! use sun_buttons::{ButtonInteraction, Edge, InteractionState};
//! use sun_property::Property;
//!
//! let interaction = ButtonInteraction::new(Property::new(true));
//!
//! // Not over the button: the press is refused.
//! assert_eq!(interaction.set_down(true), None);
//!
//! interaction.set_over(true);
//! assert_eq!(interaction.set_down(true), Some(Edge::Press));
//! assert_eq!(interaction.state(), InteractionState::Pressed);
//!
//! // Drag off, then release.
//! interaction.set_over(false);
//! assert_eq!(interaction.state(), InteractionState::Idle);
//! assert_eq!(interaction.set_down(false), Some(Edge::Release));
//! ```

use core::cell::Cell;

use sun_property::Property;

bitflags::bitflags! {
    /// Snapshot of a button's pointer and enabled state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InteractionFlags: u8 {
        /// The pointer is over the button.
        const OVER    = 0b0000_0001;
        /// The pointer is pressed on the button (possibly dragged off since).
        const DOWN    = 0b0000_0010;
        /// The button accepts input.
        const ENABLED = 0b0000_0100;
    }
}

impl InteractionFlags {
    /// Maps the flags to the appearance state of a push button.
    #[must_use]
    pub fn push_state(self) -> InteractionState {
        if !self.contains(Self::ENABLED) {
            InteractionState::Disabled
        } else if self.contains(Self::OVER | Self::DOWN) {
            InteractionState::Pressed
        } else if self.contains(Self::OVER) {
            InteractionState::Over
        } else {
            InteractionState::Idle
        }
    }
}

/// A change of the `down` flag accepted by [`ButtonInteraction::set_down`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// `down` went from `false` to `true`.
    Press,
    /// `down` went from `true` to `false`.
    Release,
}

/// Appearance state of push, sticky toggle and momentary buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// Enabled, pointer elsewhere.
    Idle,
    /// Enabled, pointer hovering.
    Over,
    /// Enabled and pressed (or latched down, for sticky buttons).
    Pressed,
    /// Disabled.
    Disabled,
    /// Disabled while latched down.
    DisabledPressed,
}

/// Appearance state of a radio group member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RadioInteractionState {
    /// Enabled and currently selected.
    Selected,
    /// Enabled, not selected, pointer elsewhere.
    Deselected,
    /// Enabled, not selected, pointer hovering.
    Over,
    /// Enabled, not selected, being pressed.
    Pressed,
    /// Disabled and selected.
    DisabledSelected,
    /// Disabled and not selected.
    DisabledDeselected,
}

/// Pointer state of one button plus its shared enabled flag.
#[derive(Debug)]
pub struct ButtonInteraction {
    /// Only `OVER` and `DOWN` are stored; `ENABLED` is read from `enabled`.
    pointer: Cell<InteractionFlags>,
    enabled: Property<bool>,
}

impl ButtonInteraction {
    /// Creates interaction state with the pointer away and not pressed.
    #[must_use]
    pub fn new(enabled: Property<bool>) -> Self {
        Self {
            pointer: Cell::new(InteractionFlags::empty()),
            enabled,
        }
    }

    /// Returns the shared enabled property.
    #[must_use]
    pub fn enabled_property(&self) -> &Property<bool> {
        &self.enabled
    }

    /// Returns `true` if the button accepts input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Returns `true` if the pointer is over the button.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.pointer.get().contains(InteractionFlags::OVER)
    }

    /// Returns `true` if the button is pressed.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.pointer.get().contains(InteractionFlags::DOWN)
    }

    /// Returns all three flags.
    #[must_use]
    pub fn flags(&self) -> InteractionFlags {
        let mut flags = self.pointer.get();
        flags.set(InteractionFlags::ENABLED, self.is_enabled());
        flags
    }

    /// Returns the push-button appearance state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.flags().push_state()
    }

    /// Records whether the pointer is over the button. Returns `true` if it changed.
    pub fn set_over(&self, over: bool) -> bool {
        let mut pointer = self.pointer.get();
        if pointer.contains(InteractionFlags::OVER) == over {
            return false;
        }
        pointer.set(InteractionFlags::OVER, over);
        self.pointer.set(pointer);
        true
    }

    /// Records whether the pointer is pressed, returning the accepted edge.
    ///
    /// Returns `None` if `down` did not change, or if a press was refused
    /// because the pointer is not over the button or the button is disabled.
    pub fn set_down(&self, down: bool) -> Option<Edge> {
        let mut pointer = self.pointer.get();
        if pointer.contains(InteractionFlags::DOWN) == down {
            return None;
        }
        if down && !(pointer.contains(InteractionFlags::OVER) && self.is_enabled()) {
            tracing::trace!(
                over = pointer.contains(InteractionFlags::OVER),
                enabled = self.is_enabled(),
                "press refused"
            );
            return None;
        }
        pointer.set(InteractionFlags::DOWN, down);
        self.pointer.set(pointer);
        Some(if down { Edge::Press } else { Edge::Release })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn over_enabled() -> ButtonInteraction {
        let interaction = ButtonInteraction::new(Property::new(true));
        interaction.set_over(true);
        interaction
    }

    #[test]
    fn press_requires_over() {
        let interaction = ButtonInteraction::new(Property::new(true));
        assert_eq!(interaction.set_down(true), None);
        assert!(!interaction.is_down());
    }

    #[test]
    fn press_requires_enabled() {
        let enabled = Property::new(false);
        let interaction = ButtonInteraction::new(enabled.clone());
        interaction.set_over(true);
        assert_eq!(interaction.set_down(true), None);

        enabled.set(true);
        assert_eq!(interaction.set_down(true), Some(Edge::Press));
    }

    #[test]
    fn repeated_down_yields_no_edge() {
        let interaction = over_enabled();
        assert_eq!(interaction.set_down(true), Some(Edge::Press));
        assert_eq!(interaction.set_down(true), None);
        assert_eq!(interaction.set_down(false), Some(Edge::Release));
        assert_eq!(interaction.set_down(false), None);
    }

    #[test]
    fn release_accepted_after_drag_off_and_disable() {
        let enabled = Property::new(true);
        let interaction = ButtonInteraction::new(enabled.clone());
        interaction.set_over(true);
        interaction.set_down(true);
        interaction.set_over(false);
        enabled.set(false);
        assert!(interaction.is_down());
        assert_eq!(interaction.set_down(false), Some(Edge::Release));
    }

    #[test]
    fn set_over_reports_change() {
        let interaction = ButtonInteraction::new(Property::new(true));
        assert!(interaction.set_over(true));
        assert!(!interaction.set_over(true));
        assert!(interaction.set_over(false));
    }

    #[test]
    fn flags_mirror_enabled_property() {
        let enabled = Property::new(true);
        let interaction = ButtonInteraction::new(enabled.clone());
        assert_eq!(interaction.flags(), InteractionFlags::ENABLED);
        enabled.set(false);
        assert_eq!(interaction.flags(), InteractionFlags::empty());
    }

    #[test]
    fn push_state_table() {
        use InteractionFlags as F;
        assert_eq!(F::ENABLED.push_state(), InteractionState::Idle);
        assert_eq!((F::ENABLED | F::OVER).push_state(), InteractionState::Over);
        assert_eq!(
            (F::ENABLED | F::OVER | F::DOWN).push_state(),
            InteractionState::Pressed
        );
        assert_eq!((F::ENABLED | F::DOWN).push_state(), InteractionState::Idle);
        assert_eq!((F::OVER | F::DOWN).push_state(), InteractionState::Disabled);
    }
}
