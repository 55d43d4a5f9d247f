// File: src/format.rs
// Purpose: Human-readable field labels and error sentences

/// `firstName` -> `First Name`
pub fn humanize_field(field: &str) -> String {
    let mut label = String::with_capacity(field.len() + 4);

    for (i, c) in field.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else {
            if c.is_uppercase() {
                label.push(' ');
            }
            label.push(c);
        }
    }

    label
}

/// `("firstName", "is required")` -> `"First Name is required"`.
///
/// The whole error text is lower-cased, so acronyms or proper nouns in a
/// custom message come out lower-case too.
pub fn format_validation_error(field: &str, error: &str) -> String {
    format!("{} {}", humanize_field(field), error.to_lowercase())
}
