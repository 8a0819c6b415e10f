// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reporting granularity and its classification rule.
//!
//! Granularity is *derived*, never stored authoritatively: whenever the
//! date-range source pushes a new range, the selector re-classifies it by
//! the whole-day difference between start and end. The windows are
//! deliberately fuzzy where the calendar is: months span 28 to 31 days,
//! years 365 or 366.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::calendar;

/// The reporting unit of a dashboard period.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dashkit::period::Granularity;
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
/// assert_eq!(Granularity::classify(start, end), Some(Granularity::Week));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// A single calendar day.
    Day,

    /// A Monday-aligned calendar week.
    Week,

    /// A calendar month.
    Month,

    /// A calendar year.
    Year,
}

impl Granularity {
    /// Classifies an inclusive `[start, end]` range by its whole-day
    /// difference.
    ///
    /// - `0` days: [`Day`](Self::Day)
    /// - `6` days: [`Week`](Self::Week)
    /// - `27` to `30` days: [`Month`](Self::Month) (tolerates 28- to
    ///   31-day calendar months with an inclusive end instant)
    /// - `364` to `366` days: [`Year`](Self::Year) (covers leap years and
    ///   both inclusive and exclusive end instants)
    ///
    /// Anything else, including inverted ranges, is unclassified (`None`).
    #[must_use]
    pub fn classify(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        if end < start {
            return None;
        }
        // Whole-day difference truncates: an inclusive end at 23:59:59
        // does not count as a full extra day.
        match (end - start).num_days() {
            0 => Some(Self::Day),
            6 => Some(Self::Week),
            27..=30 => Some(Self::Month),
            364..=366 => Some(Self::Year),
            _ => None,
        }
    }

    /// Returns the granularity-aligned start boundary of the anchor
    /// instant: start of its day, Monday-aligned week, month, or year.
    #[must_use]
    pub fn align_start(self, anchor: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Day => calendar::start_of_day(anchor),
            Self::Week => calendar::start_of_week(anchor),
            Self::Month => calendar::start_of_month(anchor),
            Self::Year => calendar::start_of_year(anchor),
        }
    }

    /// Returns the granularity-aligned inclusive end boundary of the
    /// period containing `instant`.
    #[must_use]
    pub fn align_end(self, instant: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Day => calendar::end_of_day(instant),
            Self::Week => calendar::end_of_week(instant),
            Self::Month => calendar::end_of_month(instant),
            Self::Year => calendar::end_of_year(instant),
        }
    }

    /// Shifts an instant by whole units of this granularity, using
    /// calendar-aware arithmetic.
    ///
    /// Returns `None` when the shifted date is not representable.
    #[must_use]
    pub fn shift(self, dt: NaiveDateTime, offset: i32) -> Option<NaiveDateTime> {
        match self {
            Self::Day => calendar::shift_days(dt, i64::from(offset)),
            Self::Week => calendar::shift_weeks(dt, i64::from(offset)),
            Self::Month => calendar::shift_months(dt, offset),
            Self::Year => calendar::shift_years(dt, offset),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        };
        write!(f, "{label}")
    }
}
