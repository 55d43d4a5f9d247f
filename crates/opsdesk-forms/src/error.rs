// File: src/error.rs
// Purpose: Errors raised while building schemas from configuration

use thiserror::Error;

/// A schema or rule definition that cannot be turned into a usable rule set.
///
/// Validating data never fails; only loading definitions does.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid pattern for field `{field}`: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("field `{0}` sets both `pattern` and `format`")]
    ConflictingPattern(String),

    #[error("schema `{0}` is already defined")]
    DuplicateSchema(String),

    #[error("schema `{0}` has no fields")]
    EmptySchema(String),
}
