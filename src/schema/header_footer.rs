// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Built-in contracts for dashboard header/footer widgets.
//!
//! Three variants are registered, discriminated by the `type` field:
//!
//! - `picture`: an image with optional tap/hold/double-tap actions
//! - `buttons`: a list of entity rows rendered as buttons
//! - `graph`: a history graph for a single entity
//!
//! `picture` is the default fallback contract. Besides the structural
//! registry, this module provides the typed [`HeaderFooterConfig`] mirror
//! for callers that want a deserialized value rather than a tagged
//! `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

use super::contract::{Contract, FieldKind};
use super::resolver::SchemaResolver;

/// Builds the header/footer schema registry with the three built-in
/// variants, `picture` first so it acts as the fallback contract.
///
/// # Examples
///
/// ```
/// use dashkit::schema::header_footer_schemas;
/// use serde_json::json;
///
/// let resolver = header_footer_schemas();
/// let resolved = resolver
///     .resolve(&json!({"type": "buttons", "entities": ["light.porch"]}))
///     .unwrap();
/// assert_eq!(resolved.tag(), "buttons");
/// ```
#[must_use]
pub fn header_footer_schemas() -> SchemaResolver {
    SchemaResolver::new("type")
        .register(
            Contract::new("picture")
                .required("type", FieldKind::Str)
                .required("image", FieldKind::Str)
                .optional("tap_action", FieldKind::Action)
                .optional("hold_action", FieldKind::Action)
                .optional("double_tap_action", FieldKind::Action),
        )
        .register(
            Contract::new("buttons")
                .required("type", FieldKind::Str)
                .required("entities", FieldKind::List(Box::new(FieldKind::EntityRow))),
        )
        .register(
            Contract::new("graph")
                .required("type", FieldKind::Str)
                .required("entity", FieldKind::Str)
                .optional("detail", FieldKind::Num)
                .optional("hours_to_show", FieldKind::Num),
        )
}

/// An action configuration attached to a picture header/footer.
///
/// Action options are open; the whole object is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionConfig(pub serde_json::Map<String, Value>);

/// One entity row of a buttons header/footer: either the entity id
/// shorthand or a row object with options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRowConfig {
    /// Entity id shorthand, e.g. `"light.porch"`.
    EntityId(String),

    /// A row object with a required entity and open options.
    Row {
        /// The entity this row controls.
        entity: String,
        /// Remaining row options, kept open.
        #[serde(flatten)]
        options: serde_json::Map<String, Value>,
    },
}

impl EntityRowConfig {
    /// Returns the entity id of this row.
    #[must_use]
    pub fn entity(&self) -> &str {
        match self {
            Self::EntityId(id) => id,
            Self::Row { entity, .. } => entity,
        }
    }
}

/// A validated, typed header/footer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HeaderFooterConfig {
    /// An image header/footer with optional actions.
    Picture {
        /// The image URL or path.
        image: String,
        /// Action performed on tap.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tap_action: Option<ActionConfig>,
        /// Action performed on hold.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hold_action: Option<ActionConfig>,
        /// Action performed on double tap.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        double_tap_action: Option<ActionConfig>,
    },

    /// A row of entity buttons.
    Buttons {
        /// The entities rendered as buttons.
        entities: Vec<EntityRowConfig>,
    },

    /// A history graph for one entity.
    Graph {
        /// The entity whose history is graphed.
        entity: String,
        /// Detail level of the graph.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<f64>,
        /// Number of hours of history to show.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hours_to_show: Option<f64>,
    },
}

impl HeaderFooterConfig {
    /// Returns the discriminator tag of this variant.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Picture { .. } => "picture",
            Self::Buttons { .. } => "buttons",
            Self::Graph { .. } => "graph",
        }
    }
}

/// Resolves and deserializes a raw header/footer configuration.
///
/// Structural validation runs first so failures carry a field path; the
/// validated value is then deserialized into the typed enum. Unlike the
/// structural [`SchemaResolver::resolve`], the typed mirror cannot
/// represent an unrecognized tag, so a value that only passed via the
/// fallback contract is reported as an unknown discriminator here.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the value fails its contract or
/// carries a tag the typed enum does not know.
///
/// # Examples
///
/// ```
/// use dashkit::schema::{resolve_header_footer, HeaderFooterConfig};
/// use serde_json::json;
///
/// let config = resolve_header_footer(&json!({
///     "type": "graph",
///     "entity": "sensor.power",
/// }))
/// .unwrap();
/// assert!(matches!(config, HeaderFooterConfig::Graph { entity, .. } if entity == "sensor.power"));
/// ```
pub fn resolve_header_footer(raw: &Value) -> Result<HeaderFooterConfig, ValidationError> {
    let resolved = header_footer_schemas().resolve(raw)?;
    serde_json::from_value(resolved.into_value()).map_err(|source| {
        // Reachable only when the raw tag passed via the fallback contract;
        // the typed enum has no variant for it.
        tracing::debug!(error = %source, "typed deserialization rejected fallback-validated value");
        let found = raw
            .as_object()
            .and_then(|map| map.get("type"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        ValidationError::unknown_discriminator("type", found)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use serde_json::json;

    #[test]
    fn minimal_picture_validates() {
        let config = resolve_header_footer(&json!({
            "type": "picture",
            "image": "/local/header.png",
        }))
        .unwrap();
        assert_eq!(config.tag(), "picture");
    }

    #[test]
    fn picture_with_actions_validates() {
        let config = resolve_header_footer(&json!({
            "type": "picture",
            "image": "/local/header.png",
            "tap_action": {"action": "navigate", "navigation_path": "/energy"},
        }))
        .unwrap();
        let HeaderFooterConfig::Picture { tap_action, .. } = config else {
            panic!("expected picture variant");
        };
        assert!(tap_action.is_some());
    }

    #[test]
    fn buttons_mixed_entity_rows_deserialize() {
        let config = resolve_header_footer(&json!({
            "type": "buttons",
            "entities": [
                "light.porch",
                {"entity": "switch.garden", "name": "Garden"},
            ],
        }))
        .unwrap();
        let HeaderFooterConfig::Buttons { entities } = config else {
            panic!("expected buttons variant");
        };
        assert_eq!(entities[0].entity(), "light.porch");
        assert_eq!(entities[1].entity(), "switch.garden");
    }

    #[test]
    fn graph_optionals_absent() {
        let config = resolve_header_footer(&json!({
            "type": "graph",
            "entity": "sensor.power",
        }))
        .unwrap();
        let HeaderFooterConfig::Graph {
            detail,
            hours_to_show,
            ..
        } = config
        else {
            panic!("expected graph variant");
        };
        assert!(detail.is_none());
        assert!(hours_to_show.is_none());
    }

    #[test]
    fn graph_missing_entity_fails_on_entity_path() {
        let err = resolve_header_footer(&json!({"type": "graph"})).unwrap_err();
        assert_eq!(err.path(), "entity");
        assert!(matches!(
            err.kind(),
            ValidationErrorKind::MissingField { .. }
        ));
    }

    #[test]
    fn typed_mirror_rejects_fallback_validated_tag() {
        // Structurally this satisfies the picture fallback, but the typed
        // enum cannot carry a "gauge" tag.
        let err = resolve_header_footer(&json!({
            "type": "gauge",
            "image": "/local/header.png",
        }))
        .unwrap_err();
        assert!(matches!(
            err.kind(),
            ValidationErrorKind::UnknownDiscriminator { found } if found == "gauge"
        ));
    }

    #[test]
    fn round_trips_through_serde() {
        let config = HeaderFooterConfig::Graph {
            entity: "sensor.power".to_string(),
            detail: Some(2.0),
            hours_to_show: None,
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "graph");
        let back: HeaderFooterConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }
}
