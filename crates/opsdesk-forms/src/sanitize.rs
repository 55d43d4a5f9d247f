// File: src/sanitize.rs
// Purpose: Cosmetic cleanup of free-text input

use once_cell::sync::Lazy;
use regex::Regex;

// ASCII-only matching: no Unicode case folding, `[0-9A-Za-z_]` word characters
static JAVASCRIPT_PROTOCOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u)javascript:").unwrap());
static EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u)on[0-9A-Za-z_]+=").unwrap());

/// Strip the obvious injection markers from free text.
///
/// Trims, then removes `<` and `>`, then any `javascript:`, then any
/// `on<word>=` (case-insensitive). Tag text is kept:
/// `<script>alert(1)</script>` becomes `scriptalert(1)/script`.
///
/// This is a display filter, not an HTML sanitizer. Output still needs
/// contextual escaping wherever it is rendered.
///
/// The steps are repeated until the text stops changing, so removing one
/// marker cannot leave a new one behind and the function is idempotent.
pub fn sanitize_input(value: &str) -> String {
    let mut current = sanitize_pass(value);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_pass(value: &str) -> String {
    let stripped: String = value.trim().chars().filter(|c| !matches!(c, '<' | '>')).collect();
    let stripped = JAVASCRIPT_PROTOCOL.replace_all(&stripped, "");
    EVENT_HANDLER.replace_all(&stripped, "").into_owned()
}
