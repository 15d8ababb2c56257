//! Rule catalog loading.
//!
//! The catalog is read once at startup from a JSON document and never
//! changes afterwards. The document is either a bare array of rule groups or
//! an object carrying that array under `validations`:
//!
//! ```json
//! {
//!   "validations": [
//!     {
//!       "type": "PC",
//!       "preRequestName": "isEnabled",
//!       "preRequestValue": "true",
//!       "rules": [
//!         { "paramName": "operationSystem", "regex": "^(Windows|Linux)" },
//!         { "paramName": "color", "regex": ["red", "blue"] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! A `regex` given as an array is a literal allow-list; given as a string it
//! is compiled as a regular expression. Any other shape, or an expression
//! that fails to compile, aborts the load.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::text::value_text;
use super::rules::{FieldRule, Pattern, RuleGroup};

const ENVELOPE_KEY: &str = "validations";

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("Failed to read rule catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rule catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rule catalog must be an array of rule groups or an object with a 'validations' array")]
    MissingGroups,

    #[error("Invalid regex for field '{param_name}' in rule group '{type_discriminator}': {source}")]
    InvalidRegex {
        type_discriminator: String,
        param_name: String,
        #[source]
        source: regex::Error,
    },

    #[error(
        "Unsupported pattern for field '{param_name}' in rule group '{type_discriminator}': \
         expected a regex string or an array of literal values"
    )]
    UnsupportedPattern {
        type_discriminator: String,
        param_name: String,
    },
}

/// Rule group as written in the catalog file.
#[derive(Debug, Deserialize)]
struct RawRuleGroup {
    #[serde(rename = "type")]
    type_discriminator: String,
    #[serde(rename = "preRequestName")]
    precondition_field: String,
    #[serde(rename = "preRequestValue")]
    precondition_value: String,
    #[serde(default)]
    rules: Vec<RawFieldRule>,
}

#[derive(Debug, Deserialize)]
struct RawFieldRule {
    #[serde(rename = "paramName")]
    param_name: String,
    #[serde(rename = "regex")]
    pattern: Value,
}

/// Immutable, ordered set of rule groups.
///
/// Shared read-only between all requests (typically behind an `Arc`); there
/// is no API to modify a catalog once built.
#[derive(Debug, Default)]
pub struct RuleCatalog {
    groups: Vec<RuleGroup>,
}

impl RuleCatalog {
    /// Build a catalog from already-resolved groups, keeping their order.
    pub fn new(groups: Vec<RuleGroup>) -> Self {
        Self { groups }
    }

    /// Read and parse the catalog file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;

        tracing::info!(
            path = %path.display(),
            group_count = catalog.len(),
            "Loaded validation rule catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogLoadError> {
        let root: Value = serde_json::from_str(json)?;
        let groups = match root {
            Value::Array(groups) => Value::Array(groups),
            Value::Object(mut map) => map
                .remove(ENVELOPE_KEY)
                .filter(Value::is_array)
                .ok_or(CatalogLoadError::MissingGroups)?,
            _ => return Err(CatalogLoadError::MissingGroups),
        };

        let raw: Vec<RawRuleGroup> = serde_json::from_value(groups)?;
        let groups = raw
            .into_iter()
            .map(resolve_group)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { groups })
    }

    /// All groups in catalog order.
    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Groups whose discriminator equals `type_discriminator` exactly, in
    /// catalog order.
    pub fn groups_for<'a, 'b>(
        &'a self,
        type_discriminator: &'b str,
    ) -> impl Iterator<Item = &'a RuleGroup> + 'b
    where
        'a: 'b,
    {
        self.groups
            .iter()
            .filter(move |group| group.type_discriminator == type_discriminator)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn resolve_group(raw: RawRuleGroup) -> Result<RuleGroup, CatalogLoadError> {
    let field_rules = raw
        .rules
        .into_iter()
        .map(|rule| resolve_rule(&raw.type_discriminator, rule))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RuleGroup {
        type_discriminator: raw.type_discriminator,
        precondition_field: raw.precondition_field,
        precondition_value: raw.precondition_value,
        field_rules,
    })
}

fn resolve_rule(type_discriminator: &str, raw: RawFieldRule) -> Result<FieldRule, CatalogLoadError> {
    let unsupported = || CatalogLoadError::UnsupportedPattern {
        type_discriminator: type_discriminator.to_string(),
        param_name: raw.param_name.clone(),
    };

    let pattern = match &raw.pattern {
        Value::String(expr) => {
            let re = Regex::new(expr).map_err(|source| CatalogLoadError::InvalidRegex {
                type_discriminator: type_discriminator.to_string(),
                param_name: raw.param_name.clone(),
                source,
            })?;
            Pattern::Regex(re)
        }
        Value::Array(items) => {
            let allowed = items
                .iter()
                .map(|item| match item {
                    Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                        Ok(value_text(item).into_owned())
                    }
                    _ => Err(unsupported()),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Pattern::Literal(allowed)
        }
        _ => return Err(unsupported()),
    };

    Ok(FieldRule {
        param_name: raw.param_name,
        pattern,
    })
}
