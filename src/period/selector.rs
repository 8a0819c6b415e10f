// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Period navigation as an explicit state machine.
//!
//! [`PeriodSelector::handle`] is a pure transition function
//! `(state, event, now) -> (state, requests)`. Navigation never finalizes a
//! range locally: it emits [`SourceRequest`]s for the external date-range
//! source and waits for a [`SelectorEvent::RangeUpdated`] confirmation,
//! which is the sole writer of the authoritative period. The current
//! instant is an explicit argument so transitions are deterministic under
//! test.

use chrono::NaiveDateTime;

use super::calendar;
use super::granularity::Granularity;
use super::range::{DateRange, Period};

/// An event driving the period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    /// The external source pushed a new authoritative range. A missing end
    /// defaults to the end of today.
    RangeUpdated(DateRange),

    /// The user switched the reporting granularity.
    GranularitySelected(Granularity),

    /// The user jumped to the period containing today.
    Today,

    /// The user stepped one period back.
    Previous,

    /// The user stepped one period forward.
    Next,
}

/// A request the selector delegates to the external date-range source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRequest {
    /// Adopt the given range as the new reporting period.
    SetPeriod {
        /// The requested start instant.
        start: NaiveDateTime,
        /// The requested inclusive end instant.
        end: NaiveDateTime,
    },

    /// Recompute and republish the authoritative range.
    Refresh,
}

/// The period selector state: the confirmed period (if any data has
/// arrived) and the current granularity.
///
/// The granularity is usually derived from the confirmed period but is
/// updated optimistically when the user selects a new one, so the toggle
/// reflects the choice while the source confirmation is in flight.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dashkit::period::{Granularity, PeriodSelector, SelectorEvent, SourceRequest};
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 6)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
///
/// let selector = PeriodSelector::new();
/// let (selector, requests) =
///     selector.handle(&SelectorEvent::GranularitySelected(Granularity::Week), now);
///
/// assert_eq!(selector.granularity(), Some(Granularity::Week));
/// // The selector delegates: set the Monday-aligned week, then refresh.
/// assert!(matches!(requests[0], SourceRequest::SetPeriod { .. }));
/// assert_eq!(requests[1], SourceRequest::Refresh);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodSelector {
    period: Option<Period>,
    granularity: Option<Granularity>,
}

impl PeriodSelector {
    /// Creates an uninitialized selector: no period, no granularity.
    ///
    /// The selector stays in this state until the source pushes data; if it
    /// never does, navigation stays inert (silent wait, no timeout).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the confirmed period, if any data has arrived.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        self.period
    }

    /// Returns the current granularity.
    #[must_use]
    pub fn granularity(&self) -> Option<Granularity> {
        self.granularity
    }

    /// Applies an event, returning the next state and the requests to
    /// forward to the external date-range source.
    ///
    /// `now` is the current local instant, used for "today" anchoring and
    /// for defaulting an open-ended range update.
    #[must_use]
    pub fn handle(&self, event: &SelectorEvent, now: NaiveDateTime) -> (Self, Vec<SourceRequest>) {
        match *event {
            SelectorEvent::RangeUpdated(range) => (self.confirm(range, now), Vec::new()),
            SelectorEvent::GranularitySelected(granularity) => {
                self.select_granularity(granularity, now)
            }
            SelectorEvent::Today => (*self, self.today(now)),
            SelectorEvent::Previous => (*self, self.step(-1)),
            SelectorEvent::Next => (*self, self.step(1)),
        }
    }

    /// Adopts an authoritative range pushed by the source and re-derives
    /// the granularity.
    fn confirm(&self, range: DateRange, now: NaiveDateTime) -> Self {
        let start = range.start;
        let end = range.end.unwrap_or_else(|| calendar::end_of_day(now));
        match Period::new(start, end) {
            Ok(period) => {
                let granularity = period.granularity();
                tracing::debug!(
                    start = %start,
                    end = %end,
                    granularity = granularity.map_or_else(|| "none".to_string(), |g| g.to_string()),
                    "adopted range from source"
                );
                Self {
                    period: Some(period),
                    granularity,
                }
            }
            Err(error) => {
                // The source violated the ordering invariant; keep the last
                // confirmed state rather than adopting a broken range.
                tracing::warn!(error = %error, "ignoring inverted range from source");
                *self
            }
        }
    }

    /// Computes the aligned period for a newly selected granularity.
    ///
    /// Anchors to today when no data has arrived yet or when today falls
    /// within the current period; otherwise anchors to the current start,
    /// so a user browsing the past stays in the past.
    fn select_granularity(
        &self,
        granularity: Granularity,
        now: NaiveDateTime,
    ) -> (Self, Vec<SourceRequest>) {
        let today = calendar::start_of_day(now);
        let anchor = match self.period {
            Some(period) if !period.contains(today) => period.start(),
            _ => today,
        };

        let next = Self {
            period: self.period,
            granularity: Some(granularity),
        };
        (next, aligned_requests(granularity, anchor))
    }

    /// Computes the aligned period containing now, at the current
    /// granularity. No-op while the granularity is unknown.
    fn today(&self, now: NaiveDateTime) -> Vec<SourceRequest> {
        let Some(granularity) = self.granularity else {
            tracing::debug!("ignoring today navigation without a granularity");
            return Vec::new();
        };
        aligned_requests(granularity, now)
    }

    /// Shifts the current period by one granularity unit. No-op until a
    /// range has been confirmed and classified.
    fn step(&self, offset: i32) -> Vec<SourceRequest> {
        let (Some(period), Some(granularity)) = (self.period, self.granularity) else {
            tracing::debug!(offset, "ignoring step without a classified period");
            return Vec::new();
        };

        let Some(start) = granularity.shift(period.start(), offset) else {
            tracing::warn!(offset, "step target is outside the representable calendar");
            return Vec::new();
        };
        let end = granularity.align_end(start);
        tracing::debug!(offset, start = %start, end = %end, "requesting shifted period");
        vec![SourceRequest::SetPeriod { start, end }, SourceRequest::Refresh]
    }
}

/// Builds the set-then-refresh request pair for the aligned period of the
/// given anchor.
fn aligned_requests(granularity: Granularity, anchor: NaiveDateTime) -> Vec<SourceRequest> {
    let start = granularity.align_start(anchor);
    let end = granularity.align_end(start);
    tracing::debug!(%granularity, start = %start, end = %end, "requesting aligned period");
    vec![SourceRequest::SetPeriod { start, end }, SourceRequest::Refresh]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn confirmed(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> PeriodSelector {
        let (state, requests) = PeriodSelector::new().handle(
            &SelectorEvent::RangeUpdated(DateRange::new(start, end)),
            now,
        );
        assert!(requests.is_empty(), "confirmation must not emit requests");
        state
    }

    fn set_period(requests: &[SourceRequest]) -> (NaiveDateTime, NaiveDateTime) {
        match requests {
            [SourceRequest::SetPeriod { start, end }, SourceRequest::Refresh] => (*start, *end),
            other => panic!("expected set-then-refresh, got {other:?}"),
        }
    }

    #[test]
    fn uninitialized_navigation_is_inert() {
        let now = at(2024, 3, 6, 12);
        let selector = PeriodSelector::new();
        for event in [
            SelectorEvent::Today,
            SelectorEvent::Previous,
            SelectorEvent::Next,
        ] {
            let (state, requests) = selector.handle(&event, now);
            assert_eq!(state, selector);
            assert!(requests.is_empty(), "{event:?}");
        }
    }

    #[test]
    fn range_update_classifies_week() {
        let now = at(2024, 3, 6, 12);
        let state = confirmed(
            at(2024, 3, 4, 0),
            calendar::end_of_day(at(2024, 3, 10, 0)),
            now,
        );
        assert_eq!(state.granularity(), Some(Granularity::Week));
    }

    #[test]
    fn open_ended_update_defaults_to_end_of_today() {
        let now = at(2024, 3, 6, 12);
        let (state, _) = PeriodSelector::new().handle(
            &SelectorEvent::RangeUpdated(DateRange::from_start(at(2024, 3, 6, 0))),
            now,
        );
        let period = state.period().unwrap();
        assert_eq!(period.end(), calendar::end_of_day(now));
        assert_eq!(state.granularity(), Some(Granularity::Day));
    }

    #[test]
    fn inverted_update_is_ignored() {
        let now = at(2024, 3, 6, 12);
        let state = confirmed(
            at(2024, 3, 4, 0),
            calendar::end_of_day(at(2024, 3, 10, 0)),
            now,
        );
        let (next, _) = state.handle(
            &SelectorEvent::RangeUpdated(DateRange::new(at(2024, 3, 10, 0), at(2024, 3, 4, 0))),
            now,
        );
        assert_eq!(next, state);
    }

    #[test]
    fn granularity_switch_anchors_to_today_inside_period() {
        let now = at(2024, 3, 6, 12);
        let state = confirmed(
            at(2024, 3, 4, 0),
            calendar::end_of_day(at(2024, 3, 10, 0)),
            now,
        );
        let (state, requests) =
            state.handle(&SelectorEvent::GranularitySelected(Granularity::Month), now);
        assert_eq!(state.granularity(), Some(Granularity::Month));
        let (start, end) = set_period(&requests);
        assert_eq!(start, at(2024, 3, 1, 0));
        assert_eq!(end, calendar::end_of_day(at(2024, 3, 31, 0)));
    }

    #[test]
    fn granularity_switch_anchors_to_start_outside_period() {
        // Browsing January while today is in March: stay in January.
        let now = at(2024, 3, 6, 12);
        let state = confirmed(
            at(2024, 1, 1, 0),
            calendar::end_of_day(at(2024, 1, 31, 0)),
            now,
        );
        let (_, requests) =
            state.handle(&SelectorEvent::GranularitySelected(Granularity::Week), now);
        let (start, _) = set_period(&requests);
        // 2024-01-01 is a Monday.
        assert_eq!(start, at(2024, 1, 1, 0));
    }

    #[test]
    fn granularity_switch_without_data_anchors_to_today() {
        let now = at(2024, 3, 6, 12);
        let (state, requests) =
            PeriodSelector::new().handle(&SelectorEvent::GranularitySelected(Granularity::Day), now);
        assert_eq!(state.granularity(), Some(Granularity::Day));
        let (start, end) = set_period(&requests);
        assert_eq!(start, at(2024, 3, 6, 0));
        assert_eq!(end, calendar::end_of_day(now));
    }

    #[test]
    fn granularity_switch_round_trips_classification() {
        let now = at(2024, 3, 6, 12);
        let (state, requests) = PeriodSelector::new()
            .handle(&SelectorEvent::GranularitySelected(Granularity::Week), now);
        let (start, end) = set_period(&requests);
        // Simulate the source confirming the requested range verbatim.
        let (state, _) =
            state.handle(&SelectorEvent::RangeUpdated(DateRange::new(start, end)), now);
        assert_eq!(state.granularity(), Some(Granularity::Week));
    }

    #[test]
    fn today_jumps_to_current_period() {
        let now = at(2024, 3, 6, 12);
        // Browsing a past week.
        let state = confirmed(
            at(2024, 2, 5, 0),
            calendar::end_of_day(at(2024, 2, 11, 0)),
            now,
        );
        let (_, requests) = state.handle(&SelectorEvent::Today, now);
        let (start, end) = set_period(&requests);
        assert_eq!(start, at(2024, 3, 4, 0));
        assert_eq!(end, calendar::end_of_day(at(2024, 3, 10, 0)));
    }

    #[test]
    fn next_week_moves_forward_seven_days() {
        let now = at(2024, 3, 6, 12);
        let state = confirmed(
            at(2024, 3, 4, 0),
            calendar::end_of_day(at(2024, 3, 10, 0)),
            now,
        );
        let (_, requests) = state.handle(&SelectorEvent::Next, now);
        let (start, end) = set_period(&requests);
        assert_eq!(start, at(2024, 3, 11, 0));
        assert_eq!(end, calendar::end_of_day(at(2024, 3, 17, 0)));
    }

    #[test]
    fn next_then_previous_restores_start() {
        let now = at(2024, 3, 6, 12);
        let cases = [
            (at(2024, 3, 6, 0), calendar::end_of_day(at(2024, 3, 6, 0))),
            (at(2024, 3, 4, 0), calendar::end_of_day(at(2024, 3, 10, 0))),
            (at(2024, 3, 1, 0), calendar::end_of_day(at(2024, 3, 31, 0))),
            (at(2024, 1, 1, 0), calendar::end_of_day(at(2024, 12, 31, 0))),
        ];
        for (start, end) in cases {
            let state = confirmed(start, end, now);
            let (_, forward) = state.handle(&SelectorEvent::Next, now);
            let (next_start, next_end) = set_period(&forward);
            let (state, _) = state.handle(
                &SelectorEvent::RangeUpdated(DateRange::new(next_start, next_end)),
                now,
            );
            let (_, back) = state.handle(&SelectorEvent::Previous, now);
            let (restored, _) = set_period(&back);
            assert_eq!(restored, start, "granularity of {start}");
        }
    }

    #[test]
    fn month_step_clamps_day_of_month() {
        let now = at(2024, 3, 31, 12);
        // A 31-day window starting Jan 31 classifies as month.
        let state = confirmed(
            at(2024, 1, 31, 0),
            calendar::end_of_day(at(2024, 2, 28, 0)),
            now,
        );
        assert_eq!(state.granularity(), Some(Granularity::Month));
        let (_, requests) = state.handle(&SelectorEvent::Next, now);
        let (start, _) = set_period(&requests);
        assert_eq!(start, at(2024, 2, 29, 0));
    }

    #[test]
    fn unclassified_period_cannot_step() {
        let now = at(2024, 3, 6, 12);
        // Ten days: no known granularity.
        let state = confirmed(
            at(2024, 3, 1, 0),
            calendar::end_of_day(at(2024, 3, 10, 0)),
            now,
        );
        assert_eq!(state.granularity(), None);
        let (_, requests) = state.handle(&SelectorEvent::Next, now);
        assert!(requests.is_empty());
    }
}
