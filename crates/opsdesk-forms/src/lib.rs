//! Opsdesk Forms
//!
//! Field and schema validation for the opsdesk console forms (leads,
//! invoices, projects, time entries, retainers, ...), together with the
//! small helpers those forms share: upload checks, input sanitizing,
//! error formatting and the time/retainer/report arithmetic.
//!
//! Validation never fails with an error: every check returns a
//! [`ValidationResult`] whose `errors` list is empty when the input is valid.
//!
//! ```
//! use opsdesk_forms::{validate_form, Record, RuleSet, Schema, Value};
//!
//! let schema = Schema::new("contact")
//!     .field("name", RuleSet::new().required())
//!     .field("email", RuleSet::new().required().email());
//!
//! let data = Record::from([
//!     ("name".to_string(), Value::from("")),
//!     ("email".to_string(), Value::from("x@y.com")),
//! ]);
//!
//! let result = validate_form(&data, &schema);
//! assert!(!result.is_valid);
//! assert_eq!(result.errors, vec!["name: This field is required"]);
//! ```

pub mod calc;
pub mod config;
pub mod error;
pub mod file;
pub mod format;
pub mod patterns;
pub mod rules;
pub mod sanitize;
pub mod schema;
pub mod validation;
pub mod value;

// Re-export the everyday API
pub use calc::{
    aggregate, aggregate_field, entry_duration_hours, Aggregation, BurnProjection, CalcError,
    RetainerUsage,
};
pub use config::Config;
pub use error::SchemaError;
pub use file::{validate_file, validate_file_count, validate_files, FileConstraints, FileMeta};
pub use format::{format_validation_error, humanize_field};
pub use patterns::{NamedPattern, Pattern};
pub use rules::{CustomValidator, RuleSet, RuleSpec};
pub use sanitize::sanitize_input;
pub use schema::{builtin_schema, builtin_schemas, Schema, SchemaRegistry, SchemaSpec};
pub use validation::{validate_field, validate_fields, validate_form, ValidationResult};
pub use value::{record_from_json, Record, Value};
