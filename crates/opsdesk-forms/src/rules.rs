// File: src/rules.rs
// Purpose: Per-field rule sets

use crate::error::SchemaError;
use crate::patterns::{NamedPattern, Pattern};
use crate::value::Value;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied check run on the raw (not stringified) value.
///
/// Returns `Some(message)` to report a failure; `None` or an empty string passes.
pub type CustomValidator = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Constraints for a single field. Every member is optional; an empty
/// rule set accepts anything.
#[derive(Clone, Default)]
pub struct RuleSet {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
    pub email: bool,
    pub url: bool,
    pub numeric: bool,
    pub custom: Option<CustomValidator>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<Pattern>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.required
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && !self.email
            && !self.url
            && !self.numeric
            && self.custom.is_none()
    }

    /// Short human summary, e.g. `required, email, max 100`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.required {
            parts.push("required".to_string());
        }
        if let Some(min) = self.min_length {
            parts.push(format!("min {}", min));
        }
        if let Some(max) = self.max_length {
            parts.push(format!("max {}", max));
        }
        match &self.pattern {
            Some(Pattern::Named(named)) => parts.push(format!("format {}", named)),
            Some(Pattern::Regex(regex)) => parts.push(format!("pattern /{}/", regex.as_str())),
            None => {}
        }
        if self.email {
            parts.push("email".to_string());
        }
        if self.url {
            parts.push("url".to_string());
        }
        if self.numeric {
            parts.push("numeric".to_string());
        }
        if self.custom.is_some() {
            parts.push("custom".to_string());
        }
        parts.join(", ")
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Pattern::as_str))
            .field("email", &self.email)
            .field("url", &self.url)
            .field("numeric", &self.numeric)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Rule set as written in configuration files
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpec {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Regular expression source
    #[serde(default)]
    pub pattern: Option<String>,
    /// Built-in format name (`phone`, `date`, ...)
    #[serde(default)]
    pub format: Option<NamedPattern>,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub url: bool,
    #[serde(default)]
    pub numeric: bool,
}

impl RuleSpec {
    /// Compile into a rule set; `field` names the field in error messages
    pub fn compile(&self, field: &str) -> Result<RuleSet, SchemaError> {
        let pattern = match (&self.pattern, self.format) {
            (Some(_), Some(_)) => return Err(SchemaError::ConflictingPattern(field.to_string())),
            (Some(source), None) => {
                let regex = Regex::new(source).map_err(|source| SchemaError::InvalidPattern {
                    field: field.to_string(),
                    source,
                })?;
                Some(Pattern::Regex(regex))
            }
            (None, Some(named)) => Some(Pattern::Named(named)),
            (None, None) => None,
        };

        Ok(RuleSet {
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            pattern,
            email: self.email,
            url: self.url,
            numeric: self.numeric,
            custom: None,
        })
    }
}
