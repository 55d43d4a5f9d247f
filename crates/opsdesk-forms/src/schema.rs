// File: src/schema.rs
// Purpose: Form schemas and the named schema registry

use crate::error::SchemaError;
use crate::patterns::NamedPattern;
use crate::rules::{RuleSet, RuleSpec};
use crate::value::Value;
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Field name to rule set, kept in declaration order
#[derive(Debug, Clone, Default)]
pub struct Schema {
    name: String,
    fields: Vec<(String, RuleSet)>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field. Redefining a field replaces its rules but keeps its position.
    pub fn field(mut self, name: impl Into<String>, rules: RuleSet) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = rules,
            None => self.fields.push((name, rules)),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    pub fn rules(&self, field: &str) -> Option<&RuleSet> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A schema as written in configuration files
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaSpec {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub rules: RuleSpec,
}

impl SchemaSpec {
    pub fn compile(&self) -> Result<Schema, SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::EmptySchema(self.name.clone()));
        }

        self.fields.iter().try_fold(Schema::new(&self.name), |schema, field| {
            Ok(schema.field(&field.name, field.rules.compile(&field.name)?))
        })
    }
}

fn non_negative(value: &Value) -> Option<String> {
    match value.as_number() {
        Some(n) if n < 0.0 => Some("Must not be negative".to_string()),
        _ => None,
    }
}

fn user_schema() -> Schema {
    Schema::new("user")
        .field("firstName", RuleSet::new().required().min_length(2).max_length(50))
        .field("lastName", RuleSet::new().required().min_length(2).max_length(50))
        .field("email", RuleSet::new().required().email())
        .field("phone", RuleSet::new().pattern(NamedPattern::Phone))
        .field("password", RuleSet::new().required().pattern(NamedPattern::Password))
}

fn lead_schema() -> Schema {
    Schema::new("lead")
        .field("name", RuleSet::new().required().min_length(2).max_length(100))
        .field("email", RuleSet::new().required().email())
        .field("company", RuleSet::new().max_length(100))
        .field("phone", RuleSet::new().pattern(NamedPattern::Phone))
        .field("website", RuleSet::new().url())
        .field("value", RuleSet::new().numeric().custom(non_negative))
}

fn invoice_schema() -> Schema {
    Schema::new("invoice")
        .field("invoiceNumber", RuleSet::new().required().max_length(30))
        .field("clientName", RuleSet::new().required().max_length(100))
        .field(
            "amount",
            RuleSet::new()
                .required()
                .pattern(NamedPattern::Currency)
                .numeric(),
        )
        .field("issueDate", RuleSet::new().required().pattern(NamedPattern::Date))
        .field("dueDate", RuleSet::new().required().pattern(NamedPattern::Date))
        .field("notes", RuleSet::new().max_length(500))
}

fn project_schema() -> Schema {
    Schema::new("project")
        .field("name", RuleSet::new().required().min_length(3).max_length(100))
        .field("description", RuleSet::new().max_length(1000))
        .field("startDate", RuleSet::new().required().pattern(NamedPattern::Date))
        .field("endDate", RuleSet::new().pattern(NamedPattern::Date))
        .field("budget", RuleSet::new().numeric().custom(non_negative))
}

fn time_entry_schema() -> Schema {
    Schema::new("time_entry")
        .field("project", RuleSet::new().required())
        .field("date", RuleSet::new().required().pattern(NamedPattern::Date))
        .field("startTime", RuleSet::new().required().pattern(NamedPattern::Time))
        .field("endTime", RuleSet::new().required().pattern(NamedPattern::Time))
        .field("description", RuleSet::new().max_length(500))
}

fn retainer_schema() -> Schema {
    Schema::new("retainer")
        .field("clientName", RuleSet::new().required().max_length(100))
        .field(
            "monthlyHours",
            RuleSet::new().required().numeric().custom(non_negative),
        )
        .field("hourlyRate", RuleSet::new().required().pattern(NamedPattern::Currency))
        .field("startDate", RuleSet::new().required().pattern(NamedPattern::Date))
}

static BUILTIN_SCHEMAS: Lazy<Vec<Schema>> = Lazy::new(|| {
    vec![
        user_schema(),
        lead_schema(),
        invoice_schema(),
        project_schema(),
        time_entry_schema(),
        retainer_schema(),
    ]
});

/// Pre-built schemas shipped with the library
pub fn builtin_schemas() -> &'static [Schema] {
    &BUILTIN_SCHEMAS
}

pub fn builtin_schema(name: &str) -> Option<&'static Schema> {
    BUILTIN_SCHEMAS.iter().find(|schema| schema.name() == name)
}

/// Built-in schemas plus any defined in configuration
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    custom: Vec<Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: &[SchemaSpec]) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec.compile()?)?;
        }
        Ok(registry)
    }

    /// Add a schema. Names are unique across built-in and custom schemas.
    pub fn register(&mut self, schema: Schema) -> Result<(), SchemaError> {
        if self.get(schema.name()).is_some() {
            return Err(SchemaError::DuplicateSchema(schema.name().to_string()));
        }
        tracing::debug!(schema = schema.name(), fields = schema.len(), "registered schema");
        self.custom.push(schema);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        builtin_schema(name).or_else(|| self.custom.iter().find(|s| s.name() == name))
    }

    /// Built-ins first, then custom schemas in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        builtin_schemas().iter().chain(self.custom.iter())
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(Schema::name).collect()
    }
}
