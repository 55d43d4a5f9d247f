use anyhow::Result;
use colored::Colorize;
use opsdesk_forms::{validate_file, FileConstraints, FileMeta};

pub fn execute(name: &str, size: u64, mime_type: &str, constraints: &FileConstraints) -> Result<bool> {
    let file = FileMeta::new(name, size, mime_type);
    let result = validate_file(&file, constraints);

    if result.is_valid {
        println!("{} {}", name.bold(), "✓ accepted".green());
    } else {
        println!("{} {}", name.bold(), "✗ rejected".red());
        for error in &result.errors {
            println!("    {}", error.red());
        }
    }

    Ok(result.is_valid)
}
