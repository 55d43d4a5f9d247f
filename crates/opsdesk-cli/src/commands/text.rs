use opsdesk_forms::{format_validation_error, sanitize_input};

pub fn sanitize(text: &str) {
    let cleaned = sanitize_input(text);
    if cleaned != text {
        tracing::debug!(removed = text.len() - cleaned.len(), "sanitized input");
    }
    println!("{}", cleaned);
}

pub fn format_error(field: &str, error: &str) {
    println!("{}", format_validation_error(field, error));
}
