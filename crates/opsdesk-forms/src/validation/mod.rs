// File: src/validation/mod.rs
// Purpose: Field and form validation runtime

use crate::rules::RuleSet;
use crate::schema::Schema;
use crate::value::Record;
use serde::Serialize;

mod field;

pub use field::validate_field;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid format";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL";
pub const INVALID_NUMBER_MESSAGE: &str = "Please enter a valid number";

/// Outcome of validating a field, a form or a file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Valid exactly when `errors` is empty
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a whole record against a schema.
///
/// Only fields named by the schema are checked, in schema order; a field
/// missing from `data` is validated as `Null`. Every field is evaluated so
/// the caller can show all problems at once. Messages are prefixed with
/// `"<field>: "`.
pub fn validate_form(data: &Record, schema: &Schema) -> ValidationResult {
    let mut errors = Vec::new();

    for (name, rules) in schema.fields() {
        let result = validate_field(data.get(name), rules);
        errors.extend(
            result
                .errors
                .into_iter()
                .map(|message| format!("{}: {}", name, message)),
        );
    }

    tracing::debug!(
        schema = schema.name(),
        fields = schema.len(),
        errors = errors.len(),
        "validated form"
    );

    ValidationResult::from_errors(errors)
}

/// Validate loose `(field, value)` pairs against ad-hoc rules, in the order given
pub fn validate_fields<'a, I>(fields: I) -> ValidationResult
where
    I: IntoIterator<Item = (&'a str, Option<&'a crate::value::Value>, &'a RuleSet)>,
{
    let errors = fields
        .into_iter()
        .flat_map(|(name, value, rules)| {
            validate_field(value, rules)
                .errors
                .into_iter()
                .map(move |message| format!("{}: {}", name, message))
        })
        .collect();

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_required_field_only_reports_once() {
        let schema = Schema::new("contact")
            .field("name", RuleSet::new().required())
            .field("email", RuleSet::new().required().email());

        let result = validate_form(&record(&[("name", ""), ("email", "x@y.com")]), &schema);

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["name: This field is required".to_string()]);
    }

    #[test]
    fn test_all_fields_evaluated() {
        let schema = Schema::new("contact")
            .field("name", RuleSet::new().required().min_length(3))
            .field("email", RuleSet::new().email())
            .field("age", RuleSet::new().numeric());

        let result = validate_form(
            &record(&[("name", "Al"), ("email", "nope"), ("age", "old")]),
            &schema,
        );

        assert_eq!(
            result.errors,
            vec![
                "name: Minimum length is 3 characters".to_string(),
                "email: Please enter a valid email address".to_string(),
                "age: Please enter a valid number".to_string(),
            ]
        );
    }

    #[test]
    fn test_fields_outside_schema_ignored() {
        let schema = Schema::new("contact").field("name", RuleSet::new().required());
        let data = record(&[("name", "Ada"), ("email", "not-an-email")]);

        assert_eq!(validate_form(&data, &schema), ValidationResult::success());
    }

    #[test]
    fn test_missing_field_treated_as_absent() {
        let schema = Schema::new("contact")
            .field("name", RuleSet::new().required())
            .field("notes", RuleSet::new().max_length(5));

        let result = validate_form(&Record::new(), &schema);
        assert_eq!(result.errors, vec!["name: This field is required".to_string()]);
    }

    #[test]
    fn test_error_order_is_stable() {
        let schema = Schema::new("contact")
            .field("b", RuleSet::new().required())
            .field("a", RuleSet::new().required())
            .field("c", RuleSet::new().required());

        let first = validate_form(&Record::new(), &schema);
        let second = validate_form(&Record::new(), &schema);

        assert_eq!(first, second);
        assert_eq!(
            first.errors,
            vec![
                "b: This field is required".to_string(),
                "a: This field is required".to_string(),
                "c: This field is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_validate_fields_pairs() {
        let rules = RuleSet::new().required();
        let value = Value::from("x");
        let result = validate_fields([("title", None, &rules), ("owner", Some(&value), &rules)]);

        assert_eq!(result.errors, vec!["title: This field is required".to_string()]);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let json = serde_json::to_value(ValidationResult::success()).unwrap();
        assert_eq!(json, serde_json::json!({ "isValid": true, "errors": [] }));
    }
}
