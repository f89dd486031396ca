// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-model configuration.
//!
//! Each model takes one explicit options struct listing every recognized
//! option with its default. Options are validated when the model is built.
//! With the `serde` feature, options deserialize from partial documents
//! (missing fields take their defaults) and unknown fields are rejected.
//! Durations are written as integer milliseconds (`fire_on_hold_delay_ms`).

use alloc::string::String;
use core::time::Duration;

use crate::error::OptionsError;

/// Default wait before fire-on-hold starts repeating.
pub const DEFAULT_FIRE_ON_HOLD_DELAY: Duration = Duration::from_millis(400);

/// Default interval between fire-on-hold repeats.
pub const DEFAULT_FIRE_ON_HOLD_INTERVAL: Duration = Duration::from_millis(100);

/// Options for [`PushButtonModel`](crate::PushButtonModel).
///
/// ```
/// use core::time::Duration;
/// use sun_buttons::PushButtonOptions;
///
/// let options = PushButtonOptions::default()
///     .with_fire_on_hold(true)
///     .with_fire_on_hold_interval(Duration::from_millis(50));
///
/// assert!(!options.fire_on_down);
/// assert_eq!(options.fire_on_hold_delay, Duration::from_millis(400));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct PushButtonOptions {
    /// Fire when the pointer goes down instead of when it is released over the button.
    pub fire_on_down: bool,
    /// Keep firing while the button is held down.
    pub fire_on_hold: bool,
    /// Time held before the first repeat.
    #[cfg_attr(feature = "serde", serde(rename = "fire_on_hold_delay_ms", with = "millis"))]
    pub fire_on_hold_delay: Duration,
    /// Time between repeats.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "fire_on_hold_interval_ms", with = "millis")
    )]
    pub fire_on_hold_interval: Duration,
    /// Instrumentation id reported with every event.
    pub phetio_id: String,
}

impl Default for PushButtonOptions {
    fn default() -> Self {
        Self {
            fire_on_down: false,
            fire_on_hold: false,
            fire_on_hold_delay: DEFAULT_FIRE_ON_HOLD_DELAY,
            fire_on_hold_interval: DEFAULT_FIRE_ON_HOLD_INTERVAL,
            phetio_id: String::new(),
        }
    }
}

impl PushButtonOptions {
    /// Sets [`fire_on_down`](Self::fire_on_down).
    #[must_use]
    pub fn with_fire_on_down(mut self, fire_on_down: bool) -> Self {
        self.fire_on_down = fire_on_down;
        self
    }

    /// Sets [`fire_on_hold`](Self::fire_on_hold).
    #[must_use]
    pub fn with_fire_on_hold(mut self, fire_on_hold: bool) -> Self {
        self.fire_on_hold = fire_on_hold;
        self
    }

    /// Sets [`fire_on_hold_delay`](Self::fire_on_hold_delay).
    #[must_use]
    pub fn with_fire_on_hold_delay(mut self, delay: Duration) -> Self {
        self.fire_on_hold_delay = delay;
        self
    }

    /// Sets [`fire_on_hold_interval`](Self::fire_on_hold_interval).
    #[must_use]
    pub fn with_fire_on_hold_interval(mut self, interval: Duration) -> Self {
        self.fire_on_hold_interval = interval;
        self
    }

    /// Sets [`phetio_id`](Self::phetio_id).
    #[must_use]
    pub fn with_phetio_id(mut self, id: impl Into<String>) -> Self {
        self.phetio_id = id.into();
        self
    }

    /// Checks the options for contradictions.
    ///
    /// The hold interval is only checked when fire-on-hold is enabled.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.fire_on_hold && self.fire_on_hold_interval.is_zero() {
            return Err(OptionsError::ZeroHoldInterval);
        }
        Ok(())
    }
}

/// What [`StickyToggleButtonModel::reset`](crate::StickyToggleButtonModel::reset)
/// does to the release latch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LatchResetPolicy {
    /// Leave the latch as it is.
    #[default]
    Preserve,
    /// Arm the latch so the next full press/release cycle behaves as a fresh press.
    Rearm,
}

/// Options for [`StickyToggleButtonModel`](crate::StickyToggleButtonModel).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct StickyToggleOptions {
    /// Instrumentation id reported with every event.
    pub phetio_id: String,
    /// Behavior of the release latch on reset.
    pub latch_reset: LatchResetPolicy,
}

impl StickyToggleOptions {
    /// Sets [`phetio_id`](Self::phetio_id).
    #[must_use]
    pub fn with_phetio_id(mut self, id: impl Into<String>) -> Self {
        self.phetio_id = id.into();
        self
    }

    /// Sets [`latch_reset`](Self::latch_reset).
    #[must_use]
    pub fn with_latch_reset(mut self, policy: LatchResetPolicy) -> Self {
        self.latch_reset = policy;
        self
    }
}

/// Options for [`RadioGroupMemberModel`](crate::RadioGroupMemberModel).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct RadioOptions {
    /// Instrumentation id reported with every event.
    pub phetio_id: String,
}

impl RadioOptions {
    /// Sets [`phetio_id`](Self::phetio_id).
    #[must_use]
    pub fn with_phetio_id(mut self, id: impl Into<String>) -> Self {
        self.phetio_id = id.into();
        self
    }
}

/// Options for [`MomentaryButtonModel`](crate::MomentaryButtonModel).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct MomentaryOptions {
    /// Instrumentation id reported with every event.
    pub phetio_id: String,
}

impl MomentaryOptions {
    /// Sets [`phetio_id`](Self::phetio_id).
    #[must_use]
    pub fn with_phetio_id(mut self, id: impl Into<String>) -> Self {
        self.phetio_id = id.into();
        self
    }
}

#[cfg(feature = "serde")]
mod millis {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_defaults() {
        let options = PushButtonOptions::default();
        assert!(!options.fire_on_down);
        assert!(!options.fire_on_hold);
        assert_eq!(options.fire_on_hold_delay, Duration::from_millis(400));
        assert_eq!(options.fire_on_hold_interval, Duration::from_millis(100));
        assert!(options.phetio_id.is_empty());
    }

    #[test]
    fn zero_interval_only_matters_with_fire_on_hold() {
        let options = PushButtonOptions::default().with_fire_on_hold_interval(Duration::ZERO);
        assert_eq!(options.validate(), Ok(()));
        assert_eq!(
            options.with_fire_on_hold(true).validate(),
            Err(OptionsError::ZeroHoldInterval)
        );
    }

    #[test]
    fn sticky_defaults_preserve_latch() {
        assert_eq!(
            StickyToggleOptions::default().latch_reset,
            LatchResetPolicy::Preserve
        );
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::super::*;

        #[test]
        fn partial_document_takes_defaults() {
            let options: PushButtonOptions =
                serde_json::from_str(r#"{ "fire_on_hold": true, "fire_on_hold_delay_ms": 250 }"#)
                    .unwrap();
            assert!(options.fire_on_hold);
            assert_eq!(options.fire_on_hold_delay, Duration::from_millis(250));
            assert_eq!(options.fire_on_hold_interval, DEFAULT_FIRE_ON_HOLD_INTERVAL);
        }

        #[test]
        fn unknown_fields_are_rejected() {
            let result: Result<PushButtonOptions, _> =
                serde_json::from_str(r#"{ "fireOnHold": true }"#);
            assert!(result.is_err());
        }

        #[test]
        fn durations_serialize_as_millis() {
            let json = serde_json::to_value(PushButtonOptions::default()).unwrap();
            assert_eq!(json["fire_on_hold_delay_ms"], 400);
            assert_eq!(json["fire_on_hold_interval_ms"], 100);
        }

        #[test]
        fn latch_policy_is_snake_case() {
            let options: StickyToggleOptions =
                serde_json::from_str(r#"{ "latch_reset": "rearm" }"#).unwrap();
            assert_eq!(options.latch_reset, LatchResetPolicy::Rearm);
        }
    }
}
