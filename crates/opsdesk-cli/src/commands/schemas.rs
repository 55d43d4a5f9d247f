use anyhow::{bail, Result};
use colored::Colorize;
use opsdesk_forms::{humanize_field, Schema, SchemaRegistry};

pub fn execute(registry: &SchemaRegistry, name: Option<&str>) -> Result<()> {
    let schemas: Vec<&Schema> = match name {
        Some(name) => match registry.get(name) {
            Some(schema) => vec![schema],
            None => bail!("Unknown schema `{}`", name),
        },
        None => registry.iter().collect(),
    };

    for schema in schemas {
        println!("{}", schema.name().cyan().bold());
        for (field, rules) in schema.fields() {
            let summary = rules.describe();
            println!(
                "  {:<16} {:<18} {}",
                field,
                humanize_field(field).dimmed(),
                if summary.is_empty() { "-".to_string() } else { summary }
            );
        }
        println!();
    }

    Ok(())
}
