//! Property-based tests for opsdesk-forms.

use opsdesk_forms::{sanitize_input, validate_field, validate_form, Record, RuleSet, Schema, Value};
use proptest::prelude::*;

fn arbitrary_rules() -> impl Strategy<Value = RuleSet> {
    (
        proptest::option::of(0usize..20),
        proptest::option::of(0usize..20),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(min, max, email, url, numeric)| RuleSet {
            min_length: min,
            max_length: max,
            email,
            url,
            numeric,
            ..RuleSet::default()
        })
}

// ============================================================================
// SANITIZER: applying twice equals applying once
// ============================================================================

proptest! {
    #[test]
    fn sanitize_idempotent(s in ".*") {
        let once = sanitize_input(&s);
        prop_assert_eq!(sanitize_input(&once), once);
    }

    #[test]
    fn sanitize_idempotent_on_markup(s in "[<> a-zA-Z:=]{0,40}") {
        let once = sanitize_input(&s);
        prop_assert_eq!(sanitize_input(&once), once);
    }

    #[test]
    fn sanitize_never_leaves_angle_brackets(s in ".*") {
        let out = sanitize_input(&s);
        prop_assert!(!out.contains('<') && !out.contains('>'));
    }
}

// ============================================================================
// BLANK VALUES: required reports once, optional always passes
// ============================================================================

proptest! {
    #[test]
    fn required_blank_reports_exactly_one_error(rules in arbitrary_rules(), blank in "[ \t\n]{0,5}") {
        let result = validate_field(Some(&Value::from(blank)), &rules.required());
        prop_assert!(!result.is_valid);
        prop_assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn optional_blank_is_valid(rules in arbitrary_rules(), blank in "[ \t\n]{0,5}") {
        prop_assert!(validate_field(Some(&Value::from(blank)), &rules).is_valid);
        prop_assert!(validate_field(None, &rules).is_valid);
    }

    #[test]
    fn verdict_matches_error_list(rules in arbitrary_rules(), s in ".{0,30}") {
        let result = validate_field(Some(&Value::from(s)), &rules);
        prop_assert_eq!(result.is_valid, result.errors.is_empty());
    }

    #[test]
    fn form_errors_are_deterministic(a in ".{0,10}", b in ".{0,10}") {
        let schema = Schema::new("pair")
            .field("a", RuleSet::new().required().min_length(3))
            .field("b", RuleSet::new().required().email());
        let data = Record::from([
            ("a".to_string(), Value::from(a)),
            ("b".to_string(), Value::from(b)),
        ]);

        prop_assert_eq!(validate_form(&data, &schema), validate_form(&data, &schema));
    }
}
