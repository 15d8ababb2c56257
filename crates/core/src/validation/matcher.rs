//! Rule group selection.
//!
//! The discriminator is compared exactly; the precondition value is compared
//! case-insensitively so that a rule written as `"true"` also matches the
//! `"True"` / `"TRUE"` spellings clients send. The first group in catalog
//! order wins. No match is not an error: the payload simply has nothing to
//! enforce.

use serde_json::Value;

use super::catalog::RuleCatalog;
use super::rules::RuleGroup;
use super::text::field_text;

/// First group for `type_discriminator` whose precondition value equals
/// `precondition_value`.
pub fn match_group<'a>(
    catalog: &'a RuleCatalog,
    type_discriminator: &str,
    precondition_value: &str,
) -> Option<&'a RuleGroup> {
    catalog
        .groups_for(type_discriminator)
        .find(|group| precondition_matches(group, precondition_value))
}

/// First group for `type_discriminator` whose precondition holds for
/// `payload`.
///
/// Each group names its own precondition field, read from the top level of
/// the payload. A missing or `null` precondition field never matches.
pub fn match_payload<'a>(
    catalog: &'a RuleCatalog,
    type_discriminator: &str,
    payload: &Value,
) -> Option<&'a RuleGroup> {
    catalog.groups_for(type_discriminator).find(|group| {
        field_text(payload, &group.precondition_field)
            .is_some_and(|value| precondition_matches(group, &value))
    })
}

fn precondition_matches(group: &RuleGroup, value: &str) -> bool {
    group.precondition_value.to_lowercase() == value.to_lowercase()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn group(type_discriminator: &str, field: &str, value: &str, marker: &str) -> RuleGroup {
        RuleGroup {
            type_discriminator: type_discriminator.into(),
            precondition_field: field.into(),
            precondition_value: value.into(),
            field_rules: vec![crate::validation::rules::FieldRule {
                param_name: marker.into(),
                pattern: crate::validation::rules::Pattern::Literal(vec![]),
            }],
        }
    }

    fn marker(group: Option<&RuleGroup>) -> Option<&str> {
        group.map(|g| g.field_rules[0].param_name.as_str())
    }

    fn catalog() -> RuleCatalog {
        RuleCatalog::new(vec![
            group("PC", "isEnabled", "true", "pc-enabled"),
            group("PC", "isEnabled", "True", "pc-enabled-shadowed"),
            group("PC", "isEnabled", "false", "pc-disabled"),
            group("Printer", "mode", "Duplex", "printer-duplex"),
        ])
    }

    #[test]
    fn precondition_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(marker(match_group(&catalog, "PC", "TRUE")), Some("pc-enabled"));
        assert_eq!(marker(match_group(&catalog, "PC", "False")), Some("pc-disabled"));
        assert_eq!(
            marker(match_group(&catalog, "Printer", "duplex")),
            Some("printer-duplex")
        );
    }

    #[test]
    fn discriminator_is_case_sensitive() {
        assert!(match_group(&catalog(), "pc", "true").is_none());
        assert!(match_group(&catalog(), "PRINTER", "Duplex").is_none());
    }

    #[test]
    fn first_group_in_catalog_order_wins() {
        assert_eq!(marker(match_group(&catalog(), "PC", "True")), Some("pc-enabled"));
    }

    #[test]
    fn unknown_values_match_nothing() {
        assert!(match_group(&catalog(), "PC", "maybe").is_none());
        assert!(match_group(&catalog(), "Laptop", "true").is_none());
        assert!(match_group(&RuleCatalog::default(), "PC", "true").is_none());
    }

    #[test]
    fn payload_boolean_precondition_matches_text_rule() {
        let payload = json!({"isEnabled": true});
        assert_eq!(
            marker(match_payload(&catalog(), "PC", &payload)),
            Some("pc-enabled")
        );

        let payload = json!({"isEnabled": false});
        assert_eq!(
            marker(match_payload(&catalog(), "PC", &payload)),
            Some("pc-disabled")
        );
    }

    #[test]
    fn payload_reads_each_groups_own_precondition_field() {
        let payload = json!({"mode": "DUPLEX", "isEnabled": true});
        assert_eq!(
            marker(match_payload(&catalog(), "Printer", &payload)),
            Some("printer-duplex")
        );
    }

    #[test]
    fn payload_match_agrees_with_value_match() {
        let catalog = catalog();
        let payload = json!({"isEnabled": "FALSE"});
        let by_payload = match_payload(&catalog, "PC", &payload).unwrap();
        let by_value = match_group(&catalog, "PC", "FALSE").unwrap();
        assert!(std::ptr::eq(by_payload, by_value));
    }

    #[test]
    fn match_outlives_a_short_lived_discriminator() {
        let catalog = catalog();
        let found = {
            let payload = json!({"isEnabled": true});
            let type_discriminator = String::from("PC");
            match_payload(&catalog, &type_discriminator, &payload)
        };
        assert_eq!(marker(found), Some("pc-enabled"));
    }

    #[test]
    fn missing_or_null_precondition_field_matches_nothing() {
        assert!(match_payload(&catalog(), "PC", &json!({})).is_none());
        assert!(match_payload(&catalog(), "PC", &json!({"isEnabled": null})).is_none());
    }
}
