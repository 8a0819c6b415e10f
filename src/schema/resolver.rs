// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discriminator-driven contract resolution.
//!
//! A [`SchemaResolver`] holds a set of [`Contract`]s keyed by discriminator
//! value and resolves raw configuration objects against the matching one.
//! The first registered contract is the *default*: it is also validated
//! against when the discriminator is absent, not a string, or unrecognized.
//! All registered contracts require the discriminator field, so the default
//! path surfaces a "missing `type`" error instead of a generic failure.

use serde_json::Value;

use crate::error::ValidationError;

use super::contract::Contract;

/// Resolves raw configuration values to their variant contract.
///
/// # Examples
///
/// ```
/// use dashkit::schema::{Contract, FieldKind, SchemaResolver};
/// use serde_json::json;
///
/// let resolver = SchemaResolver::new("type")
///     .register(
///         Contract::new("picture")
///             .required("type", FieldKind::Str)
///             .required("image", FieldKind::Str),
///     )
///     .register(
///         Contract::new("graph")
///             .required("type", FieldKind::Str)
///             .required("entity", FieldKind::Str),
///     );
///
/// let resolved = resolver
///     .resolve(&json!({"type": "graph", "entity": "sensor.power"}))
///     .unwrap();
/// assert_eq!(resolved.tag(), "graph");
///
/// // Missing discriminator falls back to the default (first) contract,
/// // which requires `type` and therefore fails with a useful error.
/// let err = resolver.resolve(&json!({"image": "/local/a.png"})).unwrap_err();
/// assert_eq!(err.path(), "type");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaResolver {
    discriminator: String,
    contracts: Vec<Contract>,
}

/// A successfully resolved configuration: the variant tag it validated
/// against and the validated value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    tag: String,
    value: Value,
}

impl ResolvedConfig {
    /// Returns the tag of the contract the value validated against.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the validated configuration value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the resolved configuration, returning the validated value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl SchemaResolver {
    /// Creates an empty resolver using the given discriminator field name.
    #[must_use]
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            contracts: Vec::new(),
        }
    }

    /// Registers a contract under its tag.
    ///
    /// The first registered contract becomes the default fallback for
    /// missing or unrecognized discriminators.
    #[must_use]
    pub fn register(mut self, contract: Contract) -> Self {
        self.contracts.push(contract);
        self
    }

    /// Returns the discriminator field name.
    #[must_use]
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    /// Returns the contract registered for the given tag.
    #[must_use]
    pub fn contract_for(&self, tag: &str) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.tag() == tag)
    }

    /// Returns the default contract, if any contract is registered.
    #[must_use]
    pub fn default_contract(&self) -> Option<&Contract> {
        self.contracts.first()
    }

    /// Resolves a raw configuration value to its variant contract and
    /// validates it.
    ///
    /// Resolution inspects the discriminator field:
    ///
    /// - recognized tag: validate against the matching contract;
    /// - absent or non-string: validate against the default contract, so
    ///   the caller is informed about the missing discriminator;
    /// - unrecognized tag: validate against the default contract. When
    ///   that validation fails, the error reports the unknown discriminator
    ///   value instead of the structural mismatch, which is the more
    ///   actionable message. When it succeeds, resolution succeeds tagged
    ///   as the default variant.
    ///
    /// Pure function over its input; no side effects.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the selected contract rejects the
    /// value, or when no contracts are registered.
    pub fn resolve(&self, raw: &Value) -> Result<ResolvedConfig, ValidationError> {
        let Some(default) = self.default_contract() else {
            return Err(ValidationError::missing_field(
                &self.discriminator,
                "string",
            ));
        };

        let tag = raw
            .as_object()
            .and_then(|map| map.get(&self.discriminator))
            .and_then(Value::as_str);

        match tag {
            Some(tag) => {
                if let Some(contract) = self.contract_for(tag) {
                    tracing::trace!(tag = %tag, "validating against matching contract");
                    contract.validate(raw)?;
                    Ok(ResolvedConfig {
                        tag: contract.tag().to_string(),
                        value: raw.clone(),
                    })
                } else {
                    tracing::debug!(
                        tag = %tag,
                        fallback = %default.tag(),
                        "unrecognized discriminator, validating against default contract"
                    );
                    match default.validate(raw) {
                        Ok(()) => Ok(ResolvedConfig {
                            tag: default.tag().to_string(),
                            value: raw.clone(),
                        }),
                        Err(_) => Err(ValidationError::unknown_discriminator(
                            &self.discriminator,
                            tag,
                        )),
                    }
                }
            }
            None => {
                tracing::debug!(
                    fallback = %default.tag(),
                    "discriminator absent, validating against default contract"
                );
                default.validate(raw)?;
                Ok(ResolvedConfig {
                    tag: default.tag().to_string(),
                    value: raw.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::schema::FieldKind;
    use serde_json::json;

    fn resolver() -> SchemaResolver {
        SchemaResolver::new("type")
            .register(
                Contract::new("picture")
                    .required("type", FieldKind::Str)
                    .required("image", FieldKind::Str),
            )
            .register(
                Contract::new("graph")
                    .required("type", FieldKind::Str)
                    .required("entity", FieldKind::Str),
            )
    }

    #[test]
    fn recognized_tag_selects_matching_contract() {
        let resolved = resolver()
            .resolve(&json!({"type": "graph", "entity": "sensor.power"}))
            .unwrap();
        assert_eq!(resolved.tag(), "graph");
    }

    #[test]
    fn missing_discriminator_fails_against_default() {
        let err = resolver()
            .resolve(&json!({"entity": "sensor.power"}))
            .unwrap_err();
        assert_eq!(err.path(), "type");
        assert!(matches!(
            err.kind(),
            ValidationErrorKind::MissingField { .. }
        ));
    }

    #[test]
    fn non_string_discriminator_falls_back_to_default() {
        let err = resolver().resolve(&json!({"type": 3})).unwrap_err();
        // The default contract requires `type` to be a string.
        assert_eq!(err.path(), "type");
        assert!(matches!(err.kind(), ValidationErrorKind::WrongType { .. }));
    }

    #[test]
    fn unknown_tag_failing_default_reports_discriminator() {
        let err = resolver()
            .resolve(&json!({"type": "gauge", "entity": "sensor.power"}))
            .unwrap_err();
        assert_eq!(err.path(), "type");
        assert!(matches!(
            err.kind(),
            ValidationErrorKind::UnknownDiscriminator { found } if found == "gauge"
        ));
    }

    #[test]
    fn unknown_tag_satisfying_default_succeeds_as_default() {
        // Permissive fallback: a value that structurally satisfies the
        // default variant passes despite the unrecognized tag.
        let resolved = resolver()
            .resolve(&json!({"type": "gauge", "image": "/local/a.png"}))
            .unwrap();
        assert_eq!(resolved.tag(), "picture");
    }

    #[test]
    fn non_object_input_fails_against_default() {
        let err = resolver().resolve(&json!("graph")).unwrap_err();
        assert!(matches!(err.kind(), ValidationErrorKind::WrongType { .. }));
    }

    #[test]
    fn empty_resolver_reports_missing_discriminator() {
        let empty = SchemaResolver::new("type");
        assert!(empty.resolve(&json!({})).is_err());
    }
}
