// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Calendar boundary and shift helpers.
//!
//! Dashboard periods are aligned to calendar boundaries: a "week" runs
//! Monday through Sunday, a "month" from the first to the last day of the
//! calendar month. These helpers compute those boundaries and perform
//! calendar-aware shifts (a month shift lands on the same day-of-month,
//! clamped to the nearest valid day).
//!
//! All functions operate on [`NaiveDateTime`]; timezone handling is out of
//! scope for this crate. End boundaries are inclusive last instants
//! (`23:59:59.999`), so the whole-day difference of an aligned period is
//! one less than its length in days.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use dashkit::period::calendar;
//!
//! let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6)
//!     .unwrap()
//!     .and_hms_opt(15, 30, 0)
//!     .unwrap();
//!
//! let monday = calendar::start_of_week(wednesday);
//! assert_eq!(monday.date(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
//!
//! let sunday = calendar::end_of_week(wednesday);
//! assert_eq!(sunday.date(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
//! ```

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Returns the first instant of the day containing `dt`.
#[must_use]
pub fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}

/// Returns the last instant (millisecond precision) of the day
/// containing `dt`.
#[must_use]
pub fn end_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    start_of_day(dt) + (TimeDelta::days(1) - TimeDelta::milliseconds(1))
}

/// Returns the first instant of the Monday-aligned week containing `dt`.
#[must_use]
pub fn start_of_week(dt: NaiveDateTime) -> NaiveDateTime {
    let back = u64::from(dt.weekday().num_days_from_monday());
    let monday = dt
        .date()
        .checked_sub_days(Days::new(back))
        .unwrap_or_else(|| dt.date());
    monday.and_time(NaiveTime::MIN)
}

/// Returns the last instant of the Monday-aligned week containing `dt`.
#[must_use]
pub fn end_of_week(dt: NaiveDateTime) -> NaiveDateTime {
    let sunday = start_of_week(dt)
        .date()
        .checked_add_days(Days::new(6))
        .unwrap_or_else(|| dt.date());
    end_of_day(sunday.and_time(NaiveTime::MIN))
}

/// Returns the first instant of the calendar month containing `dt`.
#[must_use]
pub fn start_of_month(dt: NaiveDateTime) -> NaiveDateTime {
    let first = dt.date().with_day(1).unwrap_or_else(|| dt.date());
    first.and_time(NaiveTime::MIN)
}

/// Returns the last instant of the calendar month containing `dt`.
#[must_use]
pub fn end_of_month(dt: NaiveDateTime) -> NaiveDateTime {
    let last = start_of_month(dt)
        .date()
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or_else(|| dt.date());
    end_of_day(last.and_time(NaiveTime::MIN))
}

/// Returns the first instant of the calendar year containing `dt`.
#[must_use]
pub fn start_of_year(dt: NaiveDateTime) -> NaiveDateTime {
    let first = NaiveDate::from_ymd_opt(dt.year(), 1, 1).unwrap_or_else(|| dt.date());
    first.and_time(NaiveTime::MIN)
}

/// Returns the last instant of the calendar year containing `dt`.
#[must_use]
pub fn end_of_year(dt: NaiveDateTime) -> NaiveDateTime {
    let last = NaiveDate::from_ymd_opt(dt.year(), 12, 31).unwrap_or_else(|| dt.date());
    end_of_day(last.and_time(NaiveTime::MIN))
}

/// Shifts `dt` by whole days, preserving the time of day.
///
/// Returns `None` when the shifted date falls outside the representable
/// calendar range.
#[must_use]
pub fn shift_days(dt: NaiveDateTime, offset: i64) -> Option<NaiveDateTime> {
    let date = if offset >= 0 {
        dt.date().checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        dt.date().checked_sub_days(Days::new(offset.unsigned_abs()))
    }?;
    Some(date.and_time(dt.time()))
}

/// Shifts `dt` by whole weeks, preserving the time of day.
#[must_use]
pub fn shift_weeks(dt: NaiveDateTime, offset: i64) -> Option<NaiveDateTime> {
    shift_days(dt, offset.checked_mul(7)?)
}

/// Shifts `dt` by whole calendar months, preserving the time of day.
///
/// The result lands on the same day-of-month when it exists, otherwise on
/// the last day of the target month (e.g. Jan 31 + 1 month = Feb 29 in a
/// leap year).
#[must_use]
pub fn shift_months(dt: NaiveDateTime, offset: i32) -> Option<NaiveDateTime> {
    let months = Months::new(offset.unsigned_abs());
    let date = if offset >= 0 {
        dt.date().checked_add_months(months)
    } else {
        dt.date().checked_sub_months(months)
    }?;
    Some(date.and_time(dt.time()))
}

/// Shifts `dt` by whole calendar years, preserving the time of day.
///
/// Feb 29 shifted into a non-leap year lands on Feb 28.
#[must_use]
pub fn shift_years(dt: NaiveDateTime, offset: i32) -> Option<NaiveDateTime> {
    shift_months(dt, offset.checked_mul(12)?)
}
