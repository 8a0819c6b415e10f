// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value model for date/time helper entities.
//!
//! A date/time helper carries a date, a time of day, or both, and its
//! value arrives as loose entity attributes (`has_date`, `has_time`,
//! `year`, `month`, `day`, `hour`, `minute`). This module parses those
//! attributes into typed values, formats them for input controls (24-hour,
//! zero-padded), and computes the update to send back only when an edit
//! actually changed something.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValueError;

/// The availability of a helper entity's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    /// The entity has a value.
    Known,

    /// The entity exists but has no value yet.
    Unknown,

    /// The entity is unavailable; its value must not be edited.
    Unavailable,
}

impl EntityStatus {
    /// Parses the entity state string into a status.
    #[must_use]
    pub fn from_state(state: &str) -> Self {
        match state {
            "unknown" => Self::Unknown,
            "unavailable" => Self::Unavailable,
            _ => Self::Known,
        }
    }
}

/// An update to send to a date/time helper after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeUpdate {
    /// The new date, when the helper has a date part.
    pub date: Option<NaiveDate>,

    /// The new time, when the helper has a time part.
    pub time: Option<NaiveTime>,
}

/// The parsed value of a date/time helper entity.
///
/// # Examples
///
/// ```
/// use dashkit::types::DateTimeInputState;
/// use serde_json::json;
///
/// let attributes = json!({
///     "has_date": true,
///     "has_time": true,
///     "year": 2024, "month": 3, "day": 6,
///     "hour": 7, "minute": 5,
/// });
/// let state =
///     DateTimeInputState::from_attributes("2024-03-06 07:05:00", attributes.as_object().unwrap())
///         .unwrap();
///
/// assert_eq!(state.formatted_time().as_deref(), Some("07:05"));
/// assert_eq!(state.formatted_date().as_deref(), Some("2024-3-6"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeInputState {
    has_date: bool,
    has_time: bool,
    status: EntityStatus,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
}

impl DateTimeInputState {
    /// Parses a helper entity's state string and attribute map.
    ///
    /// Date and time parts whose attributes are absent, or whose status is
    /// not [`EntityStatus::Known`], are left unset.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidDate`] or [`ValueError::InvalidTime`]
    /// when present attributes do not name a real calendar date or time of
    /// day.
    pub fn from_attributes(
        state: &str,
        attributes: &serde_json::Map<String, Value>,
    ) -> Result<Self, ValueError> {
        let has_date = flag(attributes, "has_date");
        let has_time = flag(attributes, "has_time");
        let status = EntityStatus::from_state(state);

        let mut date = None;
        let mut time = None;

        if status == EntityStatus::Known {
            if has_date
                && let (Some(year), Some(month), Some(day)) = (
                    number(attributes, "year"),
                    number(attributes, "month"),
                    number(attributes, "day"),
                )
            {
                let (month, day) = (clamp_u32(month), clamp_u32(day));
                let year = clamp_i32(year);
                date = Some(
                    NaiveDate::from_ymd_opt(year, month, day)
                        .ok_or(ValueError::InvalidDate { year, month, day })?,
                );
            }
            if has_time
                && let (Some(hour), Some(minute)) =
                    (number(attributes, "hour"), number(attributes, "minute"))
            {
                let (hour, minute) = (clamp_u32(hour), clamp_u32(minute));
                time = Some(
                    NaiveTime::from_hms_opt(hour, minute, 0)
                        .ok_or(ValueError::InvalidTime { hour, minute })?,
                );
            }
        }

        Ok(Self {
            has_date,
            has_time,
            status,
            date,
            time,
        })
    }

    /// Returns `true` if the helper carries a date part.
    #[must_use]
    pub fn has_date(&self) -> bool {
        self.has_date
    }

    /// Returns `true` if the helper carries a time part.
    #[must_use]
    pub fn has_time(&self) -> bool {
        self.has_time
    }

    /// Returns the availability of the value.
    #[must_use]
    pub fn status(&self) -> EntityStatus {
        self.status
    }

    /// Returns `true` when the value may be edited.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status == EntityStatus::Known
    }

    /// Returns the current date, when known.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the current time of day, when known.
    #[must_use]
    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Formats the time for a 24-hour input control, zero-padded
    /// (`"07:05"`). `None` while the time is unset.
    #[must_use]
    pub fn formatted_time(&self) -> Option<String> {
        self.time
            .map(|t| format!("{:02}:{:02}", t.hour(), t.minute()))
    }

    /// Formats the date for a date input control (`"2024-3-6"`,
    /// unpadded). `None` while the date is unset.
    #[must_use]
    pub fn formatted_date(&self) -> Option<String> {
        use chrono::Datelike;
        self.date
            .map(|d| format!("{}-{}-{}", d.year(), d.month(), d.day()))
    }

    /// Computes the update for an edited value.
    ///
    /// Returns `Ok(None)` when the edit does not change anything or the
    /// value is not editable, so callers never send redundant updates.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when an edited string does not parse.
    pub fn propose(
        &self,
        date: Option<&str>,
        time: Option<&str>,
    ) -> Result<Option<DateTimeUpdate>, ValueError> {
        if !self.is_editable() {
            return Ok(None);
        }

        let new_date = match date {
            Some(raw) if self.has_date => Some(parse_date(raw)?),
            _ => self.date,
        };
        let new_time = match time {
            Some(raw) if self.has_time => Some(parse_time(raw)?),
            _ => self.time,
        };

        if new_date == self.date && new_time == self.time {
            return Ok(None);
        }
        Ok(Some(DateTimeUpdate {
            date: new_date,
            time: new_time,
        }))
    }
}

/// Reads a boolean attribute, treating absence as `false`.
fn flag(attributes: &serde_json::Map<String, Value>, name: &str) -> bool {
    attributes.get(name).and_then(Value::as_bool).unwrap_or(false)
}

/// Reads a numeric attribute.
fn number(attributes: &serde_json::Map<String, Value>, name: &str) -> Option<i64> {
    attributes.get(name).and_then(Value::as_i64)
}

fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Parses `"YYYY-M-D"` (padding optional) into a date.
fn parse_date(raw: &str) -> Result<NaiveDate, ValueError> {
    let mut parts = raw.splitn(3, '-');
    let year = parts.next().and_then(|p| p.parse::<i32>().ok());
    let month = parts.next().and_then(|p| p.parse::<u32>().ok());
    let day = parts.next().and_then(|p| p.parse::<u32>().ok());
    match (year, month, day) {
        (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(ValueError::InvalidDate { year, month, day }),
        _ => Err(ValueError::InvalidDate {
            year: 0,
            month: 0,
            day: 0,
        }),
    }
}

/// Parses `"HH:MM"` or `"HH:MM:SS"` (24-hour) into a time; seconds are
/// dropped, matching the minute resolution of the helper.
fn parse_time(raw: &str) -> Result<NaiveTime, ValueError> {
    let mut parts = raw.splitn(3, ':');
    let hour = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let minute = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    match (hour, minute) {
        (Some(hour), Some(minute)) => NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or(ValueError::InvalidTime { hour, minute }),
        _ => Err(ValueError::InvalidTime {
            hour: u32::MAX,
            minute: u32::MAX,
        }),
    }
}
