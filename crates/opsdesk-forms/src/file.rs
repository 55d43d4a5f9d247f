// File: src/file.rs
// Purpose: Upload constraints (size, type, count)

use crate::validation::ValidationResult;
use crate::value::format_number;
use serde::{Deserialize, Serialize};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Metadata of a candidate upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

/// Limits applied to uploads
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileConstraints {
    /// Largest accepted file, in bytes
    #[serde(default)]
    pub max_size: Option<u64>,
    /// Accepted MIME types, reported in this order
    #[serde(default)]
    pub allowed_types: Option<Vec<String>>,
    /// Batch limit. Only `validate_file_count`/`validate_files` look at this.
    #[serde(default)]
    pub max_files: Option<usize>,
}

/// Megabytes as reported in messages: not rounded, formatted like any form number
pub fn format_megabytes(bytes: u64) -> String {
    format_number(bytes as f64 / BYTES_PER_MB)
}

/// Check one file's size and type.
///
/// `max_files` is ignored here: a single file cannot violate a batch limit.
/// Callers accepting several files must also run `validate_file_count`
/// (or use `validate_files`).
pub fn validate_file(file: &FileMeta, constraints: &FileConstraints) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(max_size) = constraints.max_size {
        if file.size > max_size {
            errors.push(format!(
                "File size must be less than {}MB",
                format_megabytes(max_size)
            ));
        }
    }

    if let Some(allowed) = &constraints.allowed_types {
        if !allowed.iter().any(|t| *t == file.mime_type) {
            errors.push(format!("File type must be one of: {}", allowed.join(", ")));
        }
    }

    ValidationResult::from_errors(errors)
}

/// Check a batch size against `max_files`
pub fn validate_file_count(count: usize, constraints: &FileConstraints) -> ValidationResult {
    match constraints.max_files {
        Some(max) if count > max => ValidationResult::from_errors(vec![format!(
            "You can upload a maximum of {} files",
            max
        )]),
        _ => ValidationResult::success(),
    }
}

/// Check a whole batch: the count first, then every file with its name as prefix
pub fn validate_files(files: &[FileMeta], constraints: &FileConstraints) -> ValidationResult {
    let mut errors = validate_file_count(files.len(), constraints).errors;

    for file in files {
        errors.extend(
            validate_file(file, constraints)
                .errors
                .into_iter()
                .map(|message| format!("{}: {}", file.name, message)),
        );
    }

    tracing::debug!(files = files.len(), errors = errors.len(), "validated upload batch");
    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn images_up_to(max_size: u64) -> FileConstraints {
        FileConstraints {
            max_size: Some(max_size),
            allowed_types: Some(vec!["image/png".to_string(), "image/jpeg".to_string()]),
            max_files: Some(2),
        }
    }

    #[test]
    fn test_size_limit_reports_exact_megabytes() {
        let constraints = FileConstraints {
            max_size: Some(10_000_000),
            ..FileConstraints::default()
        };
        let result = validate_file(&FileMeta::new("a.png", 11_000_000, "image/png"), &constraints);

        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["File size must be less than 9.5367431640625MB".to_string()]
        );
    }

    #[test]
    fn test_size_limit_whole_megabytes() {
        let result = validate_file(
            &FileMeta::new("a.png", 11 * 1024 * 1024, "image/png"),
            &images_up_to(10 * 1024 * 1024),
        );
        assert_eq!(result.errors, vec!["File size must be less than 10MB".to_string()]);
    }

    #[test]
    fn test_size_at_limit_passes() {
        let result = validate_file(&FileMeta::new("a.png", 1024, "image/png"), &images_up_to(1024));
        assert!(result.is_valid);
    }

    #[test]
    fn test_tiny_limit_uses_exponent() {
        assert_eq!(format_megabytes(1), "9.5367431640625e-7");
        let result = validate_file(&FileMeta::new("a.txt", 2, "text/plain"), &images_up_to(1));
        assert_eq!(
            result.errors[0],
            "File size must be less than 9.5367431640625e-7MB"
        );
    }

    #[test]
    fn test_type_not_allowed() {
        let result = validate_file(
            &FileMeta::new("a.pdf", 10, "application/pdf"),
            &images_up_to(1024),
        );
        assert_eq!(
            result.errors,
            vec!["File type must be one of: image/png, image/jpeg".to_string()]
        );
    }

    #[test]
    fn test_single_file_ignores_max_files() {
        let constraints = FileConstraints {
            max_files: Some(0),
            ..FileConstraints::default()
        };
        assert!(validate_file(&FileMeta::new("a", 1, "text/plain"), &constraints).is_valid);
    }

    #[test]
    fn test_batch() {
        let files = vec![
            FileMeta::new("one.png", 10, "image/png"),
            FileMeta::new("two.gif", 10, "image/gif"),
            FileMeta::new("three.jpg", 4096, "image/jpeg"),
        ];
        let result = validate_files(&files, &images_up_to(1024));

        assert_eq!(
            result.errors,
            vec![
                "You can upload a maximum of 2 files".to_string(),
                "two.gif: File type must be one of: image/png, image/jpeg".to_string(),
                "three.jpg: File size must be less than 0.0009765625MB".to_string(),
            ]
        );
    }

    #[test]
    fn test_constraints_from_toml() {
        let constraints: FileConstraints = toml::from_str(
            r#"
            max_size = 5242880
            allowed_types = ["application/pdf"]
        "#,
        )
        .unwrap();
        assert_eq!(constraints.max_size, Some(5_242_880));
        assert_eq!(constraints.max_files, None);
    }
}
