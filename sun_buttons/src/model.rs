// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction context and the capability trait shared by all models.

use alloc::rc::Rc;
use core::fmt;

use sun_property::Property;

use crate::error::ButtonError;
use crate::instrument::{Instrumentation, NoInstrumentation};
use crate::interaction::ButtonInteraction;

/// Collaborators a model is wired to at construction.
///
/// The default context has its own enabled property (initially `true`) and
/// records no instrumentation.
#[derive(Clone)]
pub struct ButtonContext {
    /// Enabled flag owned by the widget or application.
    pub enabled: Property<bool>,
    /// Sink receiving start/end brackets around every action.
    pub instrumentation: Rc<dyn Instrumentation>,
}

impl ButtonContext {
    /// Uses `enabled` as the model's enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: Property<bool>) -> Self {
        self.enabled = enabled;
        self
    }

    /// Routes instrumentation to `instrumentation`.
    #[must_use]
    pub fn with_instrumentation(mut self, instrumentation: Rc<dyn Instrumentation>) -> Self {
        self.instrumentation = instrumentation;
        self
    }
}

impl Default for ButtonContext {
    fn default() -> Self {
        Self {
            enabled: Property::new(true),
            instrumentation: Rc::new(NoInstrumentation),
        }
    }
}

impl fmt::Debug for ButtonContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonContext")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Uniform input routing for every button model.
///
/// Hosts that keep heterogeneous buttons in one collection can hold them as
/// `Rc<dyn ButtonModel>` and forward pointer state without knowing the variant.
///
/// ```
/// use std::rc::Rc;
/// use sun_buttons::{ButtonModel, PushButtonModel, PushButtonOptions, StickyToggleButtonModel, StickyToggleOptions};
/// use sun_property::Property;
///
/// let sound = Property::new(false);
/// let mut buttons: Vec<Rc<dyn ButtonModel>> = Vec::new();
/// buttons.push(PushButtonModel::new(PushButtonOptions::default()).unwrap());
/// buttons.push(StickyToggleButtonModel::new(
///     false,
///     true,
///     sound.clone(),
///     StickyToggleOptions::default(),
/// ));
///
/// for button in &buttons {
///     button.set_over(true);
///     button.set_down(true).unwrap();
///     button.set_down(false).unwrap();
/// }
/// assert!(sound.get());
/// ```
pub trait ButtonModel {
    /// Returns the pointer and enabled state.
    fn interaction(&self) -> &ButtonInteraction;

    /// Records whether the pointer is over the button.
    fn set_over(&self, over: bool) {
        self.interaction().set_over(over);
    }

    /// Records whether the pointer is pressed and reacts to the resulting edge.
    fn set_down(&self, down: bool) -> Result<(), ButtonError>;

    /// Performs the button's action directly, as keyboard activation does.
    fn fire(&self) -> Result<(), ButtonError>;

    /// Releases timers and subscriptions. Later calls do nothing.
    fn dispose(&self);

    /// Returns `true` once [`dispose`](Self::dispose) ran.
    fn is_disposed(&self) -> bool;

    /// Returns `true` if the button accepts input.
    fn is_enabled(&self) -> bool {
        self.interaction().is_enabled()
    }
}
