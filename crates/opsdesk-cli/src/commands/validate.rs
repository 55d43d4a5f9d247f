use super::{read_json, records_from_json};
use anyhow::{anyhow, Result};
use colored::Colorize;
use opsdesk_forms::{validate_form, SchemaRegistry, ValidationResult};
use std::path::Path;

/// Returns whether every record passed
pub fn execute(
    registry: &SchemaRegistry,
    schema_name: &str,
    input: Option<&Path>,
    json: bool,
) -> Result<bool> {
    let schema = registry.get(schema_name).ok_or_else(|| {
        anyhow!(
            "Unknown schema `{}` (available: {})",
            schema_name,
            registry.names().join(", ")
        )
    })?;

    let records = records_from_json(read_json(input)?)?;
    let results: Vec<ValidationResult> = records
        .iter()
        .map(|record| validate_form(record, schema))
        .collect();
    let all_valid = results.iter().all(|r| r.is_valid);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(all_valid);
    }

    for (i, result) in results.iter().enumerate() {
        let label = format!("#{}", i + 1);
        if result.is_valid {
            println!("{} {}", label.bold(), "✓ valid".green());
            continue;
        }

        println!("{} {}", label.bold(), "✗ invalid".red());
        for error in &result.errors {
            println!("    {}", error.red());
        }
    }

    Ok(all_valid)
}
