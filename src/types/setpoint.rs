// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clamped setpoint type for climate-style numeric controls.
//!
//! A setpoint is adjusted in discrete steps between optional bounds, the
//! way a thermostat target temperature is. Step results are rounded to the
//! step's decimal precision, so `21.0 + 0.5` yields `21.5` rather than a
//! floating-point tail. While the user is still tapping, the value is "in
//! flux"; [`is_settled`](Setpoint::is_settled) reports when the last
//! change is old enough to commit to the device.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::ValueError;

/// How long a setpoint must rest before it counts as settled.
const SETTLE_MILLIS: i64 = 2000;

/// Clamps a value against bounds that are actually set.
///
/// # Examples
///
/// ```
/// use dashkit::types::conditional_clamp;
///
/// assert_eq!(conditional_clamp(5.0, Some(7.0), Some(30.0)), 7.0);
/// assert_eq!(conditional_clamp(35.0, None, Some(30.0)), 30.0);
/// assert_eq!(conditional_clamp(35.0, None, None), 35.0);
/// ```
#[must_use]
pub fn conditional_clamp(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let value = min.map_or(value, |min| value.max(min));
    max.map_or(value, |max| value.min(max))
}

/// A numeric target value adjusted in steps between optional bounds.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dashkit::types::Setpoint;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 6)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
///
/// let mut target = Setpoint::new(21.0, 0.5)
///     .unwrap()
///     .with_bounds(Some(7.0), Some(30.0))
///     .unwrap();
///
/// assert!(target.increment(now));
/// assert_eq!(target.value(), 21.5);
/// assert!(!target.is_settled(now));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoint {
    value: f64,
    step: f64,
    min: Option<f64>,
    max: Option<f64>,
    changed_at: Option<NaiveDateTime>,
}

impl Setpoint {
    /// Creates a setpoint with the given initial value and step.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidStep`] when the step is zero, negative,
    /// or not finite.
    pub fn new(value: f64, step: f64) -> Result<Self, ValueError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ValueError::InvalidStep(step));
        }
        Ok(Self {
            value,
            step,
            min: None,
            max: None,
            changed_at: None,
        })
    }

    /// Sets the bounds, clamping the current value into them.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidBounds`] when both bounds are set and
    /// inverted.
    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Result<Self, ValueError> {
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(ValueError::InvalidBounds { min, max });
        }
        self.min = min;
        self.max = max;
        self.value = conditional_clamp(self.value, min, max);
        Ok(self)
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the adjustment step.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the lower bound, if set.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Returns the upper bound, if set.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Steps the value up. Returns `true` if the value changed.
    pub fn increment(&mut self, now: NaiveDateTime) -> bool {
        let stepped = self.round_to_step_precision(self.value + self.step);
        self.set(stepped, now)
    }

    /// Steps the value down. Returns `true` if the value changed.
    pub fn decrement(&mut self, now: NaiveDateTime) -> bool {
        let stepped = self.round_to_step_precision(self.value - self.step);
        self.set(stepped, now)
    }

    /// Adopts a new value, clamped into the bounds. Returns `true` if the
    /// value changed, marking the setpoint in flux.
    pub fn set(&mut self, value: f64, now: NaiveDateTime) -> bool {
        let clamped = conditional_clamp(value, self.min, self.max);
        if (clamped - self.value).abs() < f64::EPSILON {
            return false;
        }
        self.value = clamped;
        self.changed_at = Some(now);
        true
    }

    /// Returns `true` when the last change is old enough to commit, or
    /// when the value never changed.
    #[must_use]
    pub fn is_settled(&self, now: NaiveDateTime) -> bool {
        self.changed_at
            .is_none_or(|changed| now - changed >= TimeDelta::milliseconds(SETTLE_MILLIS))
    }

    /// Clears the in-flux marker after the value has been committed.
    pub fn settle(&mut self) {
        self.changed_at = None;
    }

    /// Rounds a stepped value to the decimal precision of the step, so
    /// repeated fractional steps do not accumulate float error.
    fn round_to_step_precision(&self, value: f64) -> f64 {
        let step = self.step.to_string();
        match step.split_once('.') {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            Some((_, fraction)) => {
                let factor = 10f64.powi(fraction.len() as i32);
                (value * factor).round() / factor
            }
            None => value.round(),
        }
    }
}

impl std::fmt::Display for Setpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 6)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn invalid_steps_are_rejected() {
        assert!(Setpoint::new(21.0, 0.0).is_err());
        assert!(Setpoint::new(21.0, -1.0).is_err());
        assert!(Setpoint::new(21.0, f64::NAN).is_err());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = Setpoint::new(21.0, 1.0)
            .unwrap()
            .with_bounds(Some(30.0), Some(7.0))
            .unwrap_err();
        assert!(matches!(err, ValueError::InvalidBounds { .. }));
    }

    #[test]
    fn bounds_clamp_initial_value() {
        let target = Setpoint::new(5.0, 1.0)
            .unwrap()
            .with_bounds(Some(7.0), Some(30.0))
            .unwrap();
        assert!((target.value() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fractional_steps_round_to_step_precision() {
        let now = at(12, 0, 0);
        let mut target = Setpoint::new(21.0, 0.5).unwrap();
        for _ in 0..3 {
            target.increment(now);
        }
        assert!((target.value() - 22.5).abs() < f64::EPSILON);
        target.decrement(now);
        assert!((target.value() - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn increment_stops_at_max() {
        let now = at(12, 0, 0);
        let mut target = Setpoint::new(29.5, 1.0)
            .unwrap()
            .with_bounds(None, Some(30.0))
            .unwrap();
        assert!(target.increment(now));
        assert!((target.value() - 30.0).abs() < f64::EPSILON);
        assert!(!target.increment(now), "already at the bound");
    }

    #[test]
    fn unbounded_setpoint_never_clamps() {
        let now = at(12, 0, 0);
        let mut target = Setpoint::new(0.0, 10.0).unwrap();
        for _ in 0..100 {
            target.increment(now);
        }
        assert!((target.value() - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn settle_window_is_two_seconds() {
        let mut target = Setpoint::new(21.0, 0.5).unwrap();
        assert!(target.is_settled(at(12, 0, 0)));

        target.increment(at(12, 0, 0));
        assert!(!target.is_settled(at(12, 0, 1)));
        assert!(target.is_settled(at(12, 0, 2)));

        target.settle();
        assert!(target.is_settled(at(12, 0, 0)));
    }

    #[test]
    fn display_shows_value() {
        let target = Setpoint::new(21.5, 0.5).unwrap();
        assert_eq!(target.to_string(), "21.5");
    }
}
