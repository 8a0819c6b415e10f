// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural contracts for card configuration variants.
//!
//! A [`Contract`] describes one variant shape of a discriminated
//! configuration: its discriminator tag and the fields the variant requires
//! or accepts. Validation is open: fields not named by the contract are
//! accepted without inspection, matching how dashboard cards tolerate
//! forward-compatible extra options.

use serde_json::Value;

use crate::error::ValidationError;

/// The expected type of a configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string.
    Str,

    /// A JSON number (integer or float).
    Num,

    /// A JSON boolean.
    Bool,

    /// An action configuration: a structural object such as
    /// `{"action": "navigate", "navigation_path": "/energy"}`.
    /// Only object-ness is checked; action options are open.
    Action,

    /// An entity-row configuration: either an entity id string shorthand
    /// (`"sensor.power"`) or an object with a required `entity` string.
    EntityRow,

    /// A JSON array whose elements all match the inner kind.
    List(Box<FieldKind>),
}

impl FieldKind {
    /// Returns a human-readable descriptor of the expected type, used in
    /// validation error messages.
    #[must_use]
    pub fn expected(&self) -> String {
        match self {
            Self::Str => "string".to_string(),
            Self::Num => "number".to_string(),
            Self::Bool => "boolean".to_string(),
            Self::Action => "action object".to_string(),
            Self::EntityRow => "entity id or entity-row object".to_string(),
            Self::List(inner) => format!("list of {}", inner.expected()),
        }
    }

    /// Validates a single value against this kind.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] rooted at `path` when the value does
    /// not match.
    pub fn validate(&self, path: &str, value: &Value) -> Result<(), ValidationError> {
        match self {
            Self::Str if value.is_string() => Ok(()),
            Self::Num if value.is_number() => Ok(()),
            Self::Bool if value.is_boolean() => Ok(()),
            Self::Action if value.is_object() => Ok(()),
            Self::EntityRow => validate_entity_row(path, value),
            Self::List(inner) => match value.as_array() {
                Some(items) => {
                    for (index, item) in items.iter().enumerate() {
                        inner.validate(&format!("{path}[{index}]"), item)?;
                    }
                    Ok(())
                }
                None => Err(ValidationError::wrong_type(
                    path,
                    self.expected(),
                    json_type_name(value),
                )),
            },
            Self::Str | Self::Num | Self::Bool | Self::Action => Err(
                ValidationError::wrong_type(path, self.expected(), json_type_name(value)),
            ),
        }
    }
}

/// Validates the entity-row union: a plain entity id string, or an object
/// carrying a required `entity` string. Extra row options are open.
fn validate_entity_row(path: &str, value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::String(_) => Ok(()),
        Value::Object(map) => match map.get("entity") {
            Some(entity) if entity.is_string() => Ok(()),
            Some(entity) => Err(ValidationError::wrong_type(
                format!("{path}.entity"),
                "string",
                json_type_name(entity),
            )),
            None => Err(ValidationError::missing_field(
                format!("{path}.entity"),
                "string",
            )),
        },
        _ => Err(ValidationError::wrong_type(
            path,
            FieldKind::EntityRow.expected(),
            json_type_name(value),
        )),
    }
}

/// Returns the JSON type name of a value for error messages.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One field of a contract: name, expected kind, and whether it must be
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    required: bool,
}

impl FieldSpec {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the expected kind of the field.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns `true` if the field must be present.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// A named structural contract for one configuration variant.
///
/// # Examples
///
/// ```
/// use dashkit::schema::{Contract, FieldKind};
/// use serde_json::json;
///
/// let graph = Contract::new("graph")
///     .required("type", FieldKind::Str)
///     .required("entity", FieldKind::Str)
///     .optional("detail", FieldKind::Num);
///
/// assert!(graph.validate(&json!({"type": "graph", "entity": "sensor.power"})).is_ok());
/// assert!(graph.validate(&json!({"type": "graph"})).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    tag: String,
    fields: Vec<FieldSpec>,
}

impl Contract {
    /// Creates an empty contract for the given discriminator tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a required field.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    /// Adds an optional field.
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    /// Returns the discriminator tag this contract is registered under.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the field specifications of this contract.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validates a raw configuration value against this contract.
    ///
    /// Every required field must be present and match its kind; every
    /// optional field, if present, must match its kind. Unknown extra
    /// fields are accepted.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered, in field
    /// declaration order.
    pub fn validate(&self, raw: &Value) -> Result<(), ValidationError> {
        let Some(map) = raw.as_object() else {
            return Err(ValidationError::wrong_type(
                "",
                "object",
                json_type_name(raw),
            ));
        };

        for field in &self.fields {
            match map.get(&field.name) {
                Some(value) => field.kind.validate(&field.name, value)?,
                None if field.required => {
                    return Err(ValidationError::missing_field(
                        &field.name,
                        field.kind.expected(),
                    ));
                }
                None => {}
            }
        }

        Ok(())
    }
}
