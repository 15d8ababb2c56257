//! Validation rule and outcome types.

use regex::Regex;

/// How a non-blank field value is checked.
///
/// Resolved once when the catalog is loaded: a JSON array in the rule file
/// becomes [`Pattern::Literal`], a JSON string becomes [`Pattern::Regex`].
#[derive(Debug, Clone)]
pub enum Pattern {
    /// The value must equal one of these strings exactly (case-sensitive).
    Literal(Vec<String>),
    /// The value must contain a match for this expression.
    Regex(Regex),
}

impl Pattern {
    /// Whether `text` satisfies the pattern.
    ///
    /// Regex patterns use search semantics; an expression that must cover
    /// the whole value has to be anchored with `^...$`.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Literal(allowed) => allowed.iter().any(|candidate| candidate == text),
            Pattern::Regex(re) => re.is_match(text),
        }
    }
}

/// A single required field and the pattern its value must satisfy.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub param_name: String,
    pub pattern: Pattern,
}

/// The field rules that apply when a payload's discriminator equals
/// `type_discriminator` and its `precondition_field` reads as
/// `precondition_value` (compared case-insensitively).
#[derive(Debug, Clone)]
pub struct RuleGroup {
    pub type_discriminator: String,
    pub precondition_field: String,
    pub precondition_value: String,
    /// Evaluated in this order; the first failure wins.
    pub field_rules: Vec<FieldRule>,
}

/// Why a payload was refused. Exactly one is reported per request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Missing field '{param_name}'.")]
    MissingField { param_name: String },

    #[error("Invalid value '{value}' for field '{param_name}'.")]
    PatternMismatch { param_name: String, value: String },

    /// `reason` is kept for logs; clients only see the generic message.
    #[error("Invalid JSON format.")]
    MalformedPayload { reason: String },
}

impl Rejection {
    /// Stable machine-readable code used in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::MissingField { .. } => "MISSING_FIELD",
            Rejection::PatternMismatch { .. } => "PATTERN_MISMATCH",
            Rejection::MalformedPayload { .. } => "MALFORMED_PAYLOAD",
        }
    }
}

/// Result of validating one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(Rejection),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }
}

impl From<Result<(), Rejection>> for ValidationOutcome {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => ValidationOutcome::Accepted,
            Err(rejection) => ValidationOutcome::Rejected(rejection),
        }
    }
}
