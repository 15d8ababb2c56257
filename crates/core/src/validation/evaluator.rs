//! Field rule evaluator. Pure logic, no I/O.

use serde_json::{Map, Value};

use super::text::{is_blank, value_text};
use super::rules::{FieldRule, Rejection, ValidationOutcome};

/// Evaluate `rules` in order against a properties object, stopping at the
/// first failure.
pub fn validate(properties: &Map<String, Value>, rules: &[FieldRule]) -> ValidationOutcome {
    rules
        .iter()
        .try_for_each(|rule| check_field(rule, properties))
        .into()
}

/// Check one rule.
///
/// The key must be present. A blank value (empty, whitespace-only or `null`)
/// counts as provided and skips the pattern check; any other value must
/// satisfy the rule's pattern.
pub fn check_field(rule: &FieldRule, properties: &Map<String, Value>) -> Result<(), Rejection> {
    let Some(value) = properties.get(&rule.param_name) else {
        return Err(Rejection::MissingField {
            param_name: rule.param_name.clone(),
        });
    };

    let text = value_text(value);
    if is_blank(&text) || rule.pattern.matches(&text) {
        return Ok(());
    }

    Err(Rejection::PatternMismatch {
        param_name: rule.param_name.clone(),
        value: text.into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use regex::Regex;
    use serde_json::json;

    use super::*;
    use crate::validation::rules::Pattern;

    fn regex_rule(name: &str, expr: &str) -> FieldRule {
        FieldRule {
            param_name: name.to_string(),
            pattern: Pattern::Regex(Regex::new(expr).unwrap()),
        }
    }

    fn literal_rule(name: &str, values: &[&str]) -> FieldRule {
        FieldRule {
            param_name: name.to_string(),
            pattern: Pattern::Literal(values.iter().map(|v| v.to_string()).collect()),
        }
    }

    fn data(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn serial_rule() -> FieldRule {
        regex_rule("serialNumber", r"^[A-Z]{2}\d{6}$")
    }

    #[test]
    fn missing_field_is_rejected() {
        let result = validate(&data(&[]), &[serial_rule()]);
        assert_matches!(
            result,
            ValidationOutcome::Rejected(Rejection::MissingField { param_name }) if param_name == "serialNumber"
        );
    }

    #[test]
    fn regex_mismatch_is_rejected_with_value() {
        let d = data(&[("serialNumber", json!("ab1"))]);
        assert_eq!(
            validate(&d, &[serial_rule()]),
            ValidationOutcome::Rejected(Rejection::PatternMismatch {
                param_name: "serialNumber".into(),
                value: "ab1".into(),
            })
        );
    }

    #[test]
    fn regex_match_is_accepted() {
        let d = data(&[("serialNumber", json!("AB123456"))]);
        assert_eq!(validate(&d, &[serial_rule()]), ValidationOutcome::Accepted);
    }

    #[test]
    fn unanchored_regex_accepts_partial_match() {
        let d = data(&[("os", json!("Windows 11 Pro"))]);
        let rule = regex_rule("os", "Windows|Linux");
        assert_eq!(validate(&d, &[rule]), ValidationOutcome::Accepted);
    }

    #[test]
    fn literal_outside_set_is_rejected() {
        let d = data(&[("color", json!("green"))]);
        assert_matches!(
            validate(&d, &[literal_rule("color", &["red", "blue"])]),
            ValidationOutcome::Rejected(Rejection::PatternMismatch { value, .. }) if value == "green"
        );
    }

    #[test]
    fn literal_in_set_continues_to_next_rule() {
        let d = data(&[("color", json!("blue"))]);
        let rules = [literal_rule("color", &["red", "blue"]), serial_rule()];
        assert_matches!(
            validate(&d, &rules),
            ValidationOutcome::Rejected(Rejection::MissingField { param_name }) if param_name == "serialNumber"
        );
    }

    #[test]
    fn literal_comparison_is_case_sensitive() {
        let d = data(&[("color", json!("Blue"))]);
        assert!(!validate(&d, &[literal_rule("color", &["red", "blue"])]).is_accepted());
    }

    #[test]
    fn blank_values_skip_pattern_check() {
        for blank in [json!(""), json!("   "), json!("\t\n"), json!(null)] {
            let d = data(&[("serialNumber", blank.clone())]);
            assert_eq!(
                validate(&d, &[serial_rule()]),
                ValidationOutcome::Accepted,
                "blank value {blank} should be accepted"
            );
            let d = data(&[("color", blank)]);
            assert!(validate(&d, &[literal_rule("color", &["red"])]).is_accepted());
        }
    }

    #[test]
    fn non_string_values_are_checked_as_text() {
        let d = data(&[("ram", json!(16)), ("wifi", json!(true))]);
        let rules = [regex_rule("ram", r"^\d+$"), literal_rule("wifi", &["true"])];
        assert_eq!(validate(&d, &rules), ValidationOutcome::Accepted);
    }

    #[test]
    fn evaluation_stops_at_first_failure() {
        let d = data(&[("serialNumber", json!("bad")), ("color", json!("green"))]);
        let rules = [serial_rule(), literal_rule("color", &["red"])];
        assert_matches!(
            validate(&d, &rules),
            ValidationOutcome::Rejected(Rejection::PatternMismatch { param_name, .. }) if param_name == "serialNumber"
        );
    }

    #[test]
    fn no_rules_accepts_anything() {
        let d = data(&[("anything", json!("goes"))]);
        assert_eq!(validate(&d, &[]), ValidationOutcome::Accepted);
    }
}
