// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `dashkit` library.
//!
//! This module provides the error hierarchy for the library: configuration
//! validation failures and value constraint violations.
//!
//! Validation failures are ordinary return values, not faults. Callers
//! decide whether a failed card validation blocks loading or merely renders
//! a warning, so [`ValidationError`] carries enough structure (field path,
//! expected and actual descriptors) to produce an actionable message.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A configuration value failed validation against its contract.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

/// The reason a configuration value failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required field is absent.
    #[error("missing required field of type {expected}")]
    MissingField {
        /// The expected type of the missing field.
        expected: String,
    },

    /// A field is present but has the wrong type.
    #[error("expected {expected}, got {actual}")]
    WrongType {
        /// The expected type descriptor.
        expected: String,
        /// The actual type descriptor of the provided value.
        actual: String,
    },

    /// The discriminator value does not name any registered contract.
    #[error("unknown discriminator value {found:?}")]
    UnknownDiscriminator {
        /// The unrecognized discriminator value.
        found: String,
    },
}

/// A structured configuration validation failure.
///
/// Identifies the failing field by path (e.g. `entities[2].entity`) and the
/// reason it failed. Produced by the schema resolver; never panicked.
///
/// # Examples
///
/// ```
/// use dashkit::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::missing_field("entity", "string");
/// assert_eq!(err.path(), "entity");
/// assert!(matches!(err.kind(), ValidationErrorKind::MissingField { .. }));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid configuration at `{path}`: {kind}")]
pub struct ValidationError {
    path: String,
    kind: ValidationErrorKind,
}

impl ValidationError {
    /// Creates a validation error with an explicit path and kind.
    #[must_use]
    pub fn new(path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Creates a missing-field error at the given path.
    #[must_use]
    pub fn missing_field(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(
            path,
            ValidationErrorKind::MissingField {
                expected: expected.into(),
            },
        )
    }

    /// Creates a wrong-type error at the given path.
    #[must_use]
    pub fn wrong_type(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            ValidationErrorKind::WrongType {
                expected: expected.into(),
                actual: actual.into(),
            },
        )
    }

    /// Creates an unknown-discriminator error at the given path.
    #[must_use]
    pub fn unknown_discriminator(path: impl Into<String>, found: impl Into<String>) -> Self {
        Self::new(
            path,
            ValidationErrorKind::UnknownDiscriminator {
                found: found.into(),
            },
        )
    }

    /// Returns the path of the failing field.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the reason the field failed validation.
    #[must_use]
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A setpoint step is zero, negative, or not finite.
    #[error("step {0} must be positive and finite")]
    InvalidStep(f64),

    /// A setpoint bound pair is inverted.
    #[error("minimum {min} is greater than maximum {max}")]
    InvalidBounds {
        /// The lower bound.
        min: f64,
        /// The upper bound.
        max: f64,
    },

    /// A period start lies after its end.
    #[error("period start {start} is after end {end}")]
    InvertedRange {
        /// The start instant.
        start: chrono::NaiveDateTime,
        /// The end instant.
        end: chrono::NaiveDateTime,
    },

    /// A calendar field combination does not name a real date.
    #[error("invalid date: year {year}, month {month}, day {day}")]
    InvalidDate {
        /// The year component.
        year: i32,
        /// The month component (1-12).
        month: u32,
        /// The day component (1-31).
        day: u32,
    },

    /// A clock field combination does not name a real time of day.
    #[error("invalid time: hour {hour}, minute {minute}")]
    InvalidTime {
        /// The hour component (0-23).
        hour: u32,
        /// The minute component (0-59).
        minute: u32,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
