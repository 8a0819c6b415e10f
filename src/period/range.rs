// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Period and date-range value types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValueError;

use super::Granularity;

/// An ordered pair of calendar instants with `start <= end`.
///
/// The granularity of a period is derived from its day-count, never stored
/// (see [`Granularity::classify`]).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dashkit::period::{Granularity, Period};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 10)
///     .unwrap()
///     .and_hms_opt(23, 59, 59)
///     .unwrap();
///
/// let period = Period::new(start, end).unwrap();
/// assert_eq!(period.granularity(), Some(Granularity::Week));
/// assert!(Period::new(end, start).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Period {
    /// Creates a period from an ordered start/end pair.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvertedRange`] when `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValueError> {
        if start > end {
            return Err(ValueError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the start instant.
    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the inclusive end instant.
    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the derived granularity, or `None` when the day-count does
    /// not match any known reporting unit.
    #[must_use]
    pub fn granularity(&self) -> Option<Granularity> {
        Granularity::classify(self.start, self.end)
    }

    /// Returns `true` if the instant falls within `[start, end]`.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// A date range pushed by the external date-range source.
///
/// The end is optional; a missing end means "up to the end of today" and
/// is substituted by the consumer when the update is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The start instant of the range.
    pub start: NaiveDateTime,

    /// The inclusive end instant, if the source has one.
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// Creates a range with both endpoints.
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Creates a range with an open end ("through today").
    #[must_use]
    pub fn from_start(start: NaiveDateTime) -> Self {
        Self { start, end: None }
    }
}
