// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tagged-union validation of dashboard card configuration.
//!
//! Dashboard cards are configured with loosely-typed objects whose shape
//! depends on a discriminator field. This module determines which variant
//! contract a raw value must satisfy and validates it, returning either a
//! tagged value or a structured [`ValidationError`](crate::ValidationError).
//!
//! # Examples
//!
//! ```
//! use dashkit::schema::header_footer_schemas;
//! use serde_json::json;
//!
//! let resolver = header_footer_schemas();
//!
//! let resolved = resolver
//!     .resolve(&json!({"type": "graph", "entity": "sensor.power"}))
//!     .unwrap();
//! assert_eq!(resolved.tag(), "graph");
//! ```

mod contract;
mod header_footer;
mod resolver;

pub use contract::{Contract, FieldKind, FieldSpec, json_type_name};
pub use header_footer::{
    ActionConfig, EntityRowConfig, HeaderFooterConfig, header_footer_schemas,
    resolve_header_footer,
};
pub use resolver::{ResolvedConfig, SchemaResolver};
