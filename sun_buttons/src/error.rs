// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract violations reported by button models.
//!
//! Every variant is a programming error on the caller's side. Models report
//! them immediately and abort the offending operation; they never retry or
//! guess a recovery.

use core::fmt;

/// Error returned by button model operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ButtonError {
    /// `fire` was called while the model was already dispatching to its listeners.
    AlreadyFiring,
    /// A toggle found the shared value equal to neither the up nor the down value.
    ValueOutOfRange,
    /// The model was used after [`dispose`](crate::ButtonModel::dispose).
    Disposed,
    /// Two members of one radio group were given equal values.
    DuplicateRadioValue,
    /// The options passed at construction were rejected.
    InvalidOptions(OptionsError),
}

impl fmt::Display for ButtonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyFiring => f.write_str("cannot fire when already firing"),
            Self::ValueOutOfRange => {
                f.write_str("toggle value is neither the up value nor the down value")
            }
            Self::Disposed => f.write_str("button model has been disposed"),
            Self::DuplicateRadioValue => f.write_str("radio group values must be unique"),
            Self::InvalidOptions(err) => write!(f, "invalid button options: {err}"),
        }
    }
}

impl core::error::Error for ButtonError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidOptions(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OptionsError> for ButtonError {
    fn from(err: OptionsError) -> Self {
        Self::InvalidOptions(err)
    }
}

/// A rejected configuration value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OptionsError {
    /// Fire-on-hold was enabled with a zero repeat interval.
    ZeroHoldInterval,
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroHoldInterval => {
                f.write_str("fire-on-hold interval must be non-zero when fire-on-hold is enabled")
            }
        }
    }
}

impl core::error::Error for OptionsError {}
