// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reporting-period selection for the energy dashboard.
//!
//! The dashboard shows one reporting period at a time: a day, a
//! Monday-aligned week, a calendar month, or a calendar year. This module
//! provides the pieces of that feature:
//!
//! - [`Granularity`] and [`Period`] - classification of a date range by
//!   its whole-day length
//! - [`calendar`] - boundary alignment and calendar-aware shifts
//! - [`PeriodSelector`] - the navigation state machine
//! - [`PeriodCollection`] / [`PeriodNavigator`] - the subscribable
//!   date-range source and the driver wiring both together
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use dashkit::period::{Granularity, PeriodCollection, PeriodNavigator};
//!
//! let collection = Arc::new(PeriodCollection::with_key("energy"));
//! let navigator = PeriodNavigator::new(Arc::clone(&collection));
//!
//! // Nothing is confirmed until the source publishes.
//! assert!(navigator.period().is_none());
//!
//! navigator.select_granularity(Granularity::Week);
//! let period = navigator.period().expect("confirmed by the collection");
//! assert_eq!(period.granularity(), Some(Granularity::Week));
//! ```

pub mod calendar;
mod collection;
mod granularity;
mod range;
mod selector;

pub use collection::{PeriodCollection, PeriodNavigator, PeriodSubscription, SubscriptionId};
pub use granularity::Granularity;
pub use range::{DateRange, Period};
pub use selector::{PeriodSelector, SelectorEvent, SourceRequest};
