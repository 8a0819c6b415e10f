// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `dashkit` - the non-presentational core of a home-automation dashboard.
//!
//! This library provides the data layer behind dashboard widgets:
//! validation of discriminated card configuration, reporting-period
//! navigation for the energy view, and value models for a few input
//! controls. Rendering, styling, localization, and backend calls live
//! elsewhere; everything here is plain data and pure logic.
//!
//! # Supported Features
//!
//! - **Card validation**: tagged-union schema resolution for
//!   header/footer widgets, with structured errors (field path, expected
//!   vs. actual type)
//! - **Period navigation**: day/week/month/year granularity classification,
//!   calendar-aligned previous/next/today navigation, delegated through a
//!   subscribable date-range source
//! - **Control values**: clamped climate setpoints, date/time helper
//!   values
//!
//! # Quick Start
//!
//! ## Validating a card configuration
//!
//! ```
//! use dashkit::schema::{HeaderFooterConfig, resolve_header_footer};
//! use serde_json::json;
//!
//! let raw = json!({"type": "graph", "entity": "sensor.power"});
//! let config = resolve_header_footer(&raw).unwrap();
//! assert!(matches!(config, HeaderFooterConfig::Graph { .. }));
//!
//! // Validation errors are return values with a field path, never panics.
//! let err = resolve_header_footer(&json!({"type": "graph"})).unwrap_err();
//! assert_eq!(err.path(), "entity");
//! ```
//!
//! ## Navigating the reporting period
//!
//! ```
//! use std::sync::Arc;
//! use dashkit::period::{Granularity, PeriodCollection, PeriodNavigator};
//!
//! let collection = Arc::new(PeriodCollection::with_key("energy"));
//! let navigator = PeriodNavigator::new(Arc::clone(&collection));
//!
//! navigator.select_granularity(Granularity::Week);
//! let week = navigator.period().expect("confirmed by the collection");
//! assert_eq!(week.granularity(), Some(Granularity::Week));
//!
//! navigator.previous();
//! assert!(navigator.period().unwrap().start() < week.start());
//! ```
//!
//! The navigation discipline is delegate-then-confirm: user actions only
//! *request* a range from the date-range source; the source's published
//! update is what moves the confirmed state. For a custom source, drive
//! [`period::PeriodSelector`] directly - it is a pure
//! `(state, event, now) -> (state, requests)` transition function.

pub mod error;
pub mod period;
pub mod schema;
pub mod types;

pub use error::{Error, Result, ValidationError, ValidationErrorKind, ValueError};
pub use period::{
    DateRange, Granularity, Period, PeriodCollection, PeriodNavigator, PeriodSelector,
    PeriodSubscription, SelectorEvent, SourceRequest, SubscriptionId,
};
pub use schema::{
    Contract, FieldKind, HeaderFooterConfig, ResolvedConfig, SchemaResolver,
    header_footer_schemas, resolve_header_footer,
};
pub use types::{DateTimeInputState, DateTimeUpdate, Setpoint};
