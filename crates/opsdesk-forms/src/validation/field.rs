// File: src/validation/field.rs
// Purpose: Single-field rule evaluation

use super::{
    ValidationResult, INVALID_EMAIL_MESSAGE, INVALID_FORMAT_MESSAGE, INVALID_NUMBER_MESSAGE,
    INVALID_URL_MESSAGE, REQUIRED_MESSAGE,
};
use crate::patterns::NamedPattern;
use crate::rules::RuleSet;
use crate::value::Value;

/// Validate one value against one rule set.
///
/// `None` means the field was not submitted at all. Messages are reported in
/// a fixed order: required, length, pattern, email, url, numeric, custom.
/// A required-but-blank value reports only the required message; a blank
/// optional value is always valid.
pub fn validate_field(value: Option<&Value>, rules: &RuleSet) -> ValidationResult {
    let value = match value {
        Some(value) if !value.is_blank() => value,
        _ if rules.required => {
            return ValidationResult::from_errors(vec![REQUIRED_MESSAGE.to_string()])
        }
        _ => return ValidationResult::success(),
    };

    let text = value.to_string();
    let mut errors = Vec::new();

    // Both bounds may fire when a caller supplies min > max
    let length = text.chars().count();
    if let Some(min) = rules.min_length {
        if length < min {
            errors.push(format!("Minimum length is {} characters", min));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            errors.push(format!("Maximum length is {} characters", max));
        }
    }

    if let Some(pattern) = &rules.pattern {
        if !pattern.is_match(&text) {
            errors.push(INVALID_FORMAT_MESSAGE.to_string());
        }
    }

    if rules.email && !NamedPattern::Email.is_match(&text) {
        errors.push(INVALID_EMAIL_MESSAGE.to_string());
    }

    if rules.url && !NamedPattern::Url.is_match(&text) {
        errors.push(INVALID_URL_MESSAGE.to_string());
    }

    if rules.numeric && value.as_number().is_none() {
        errors.push(INVALID_NUMBER_MESSAGE.to_string());
    }

    if let Some(custom) = &rules.custom {
        if let Some(message) = custom(value).filter(|m| !m.is_empty()) {
            errors.push(message);
        }
    }

    ValidationResult::from_errors(errors)
}
