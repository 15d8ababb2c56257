//! Reading request payloads the way the rule engine sees them.
//!
//! Payloads are untyped JSON. Values are compared in their text form (see
//! [`super::text`]).

use serde_json::{Map, Value};

use super::catalog::RuleCatalog;
use super::evaluator;
use super::matcher;
use super::rules::{Rejection, ValidationOutcome};

pub const DEFAULT_DISCRIMINATOR_FIELD: &str = "deviceTypeName";
pub const DEFAULT_PROPERTIES_FIELD: &str = "additionalProperties";

/// Names of the top-level payload fields the engine inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadShape {
    /// String field selecting the rule groups (e.g. the device type name).
    pub discriminator_field: String,
    /// Object field holding the properties the field rules apply to.
    pub properties_field: String,
}

impl Default for PayloadShape {
    fn default() -> Self {
        Self {
            discriminator_field: DEFAULT_DISCRIMINATOR_FIELD.to_string(),
            properties_field: DEFAULT_PROPERTIES_FIELD.to_string(),
        }
    }
}

/// The payload's discriminator, if present as a JSON string.
pub fn discriminator<'a>(payload: &'a Value, shape: &PayloadShape) -> Option<&'a str> {
    payload.get(&shape.discriminator_field)?.as_str()
}

/// Validate an already-parsed payload.
///
/// A payload without a discriminator, or one that matches no rule group, is
/// accepted unchecked. When a group matches but the payload carries no
/// properties object, the rules are applied to an empty object so the first
/// rule reports its field as missing.
pub fn validate_value(
    catalog: &RuleCatalog,
    shape: &PayloadShape,
    payload: &Value,
) -> ValidationOutcome {
    let Some(type_discriminator) = discriminator(payload, shape) else {
        tracing::debug!(
            field = %shape.discriminator_field,
            "Payload has no discriminator, nothing to enforce"
        );
        return ValidationOutcome::Accepted;
    };

    let Some(group) = matcher::match_payload(catalog, type_discriminator, payload) else {
        tracing::debug!(
            type_discriminator,
            "No rule group matches payload, nothing to enforce"
        );
        return ValidationOutcome::Accepted;
    };

    tracing::debug!(
        type_discriminator,
        precondition_field = %group.precondition_field,
        precondition_value = %group.precondition_value,
        rule_count = group.field_rules.len(),
        "Matched rule group"
    );

    let empty = Map::new();
    let properties = payload
        .get(&shape.properties_field)
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    evaluator::validate(properties, &group.field_rules)
}

/// Parse a raw request body and validate it.
///
/// Bodies that are not valid JSON are rejected with
/// [`Rejection::MalformedPayload`] regardless of the catalog contents.
pub fn validate_body(catalog: &RuleCatalog, shape: &PayloadShape, body: &[u8]) -> ValidationOutcome {
    match serde_json::from_slice::<Value>(body) {
        Ok(payload) => validate_value(catalog, shape, &payload),
        Err(err) => ValidationOutcome::Rejected(Rejection::MalformedPayload {
            reason: err.to_string(),
        }),
    }
}
