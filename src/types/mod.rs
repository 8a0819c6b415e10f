// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for dashboard controls.
//!
//! # Types
//!
//! - [`Setpoint`] - clamped, stepped numeric target (climate controls)
//! - [`DateTimeInputState`] - value model of a date/time helper entity

mod datetime_input;
mod setpoint;

pub use datetime_input::{DateTimeInputState, DateTimeUpdate, EntityStatus};
pub use setpoint::{Setpoint, conditional_clamp};
