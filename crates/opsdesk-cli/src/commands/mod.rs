pub mod calc;
pub mod file;
pub mod schemas;
pub mod text;
pub mod validate;

use anyhow::{bail, Context, Result};
use opsdesk_forms::{record_from_json, Record};
use std::io::Read;
use std::path::Path;

/// Read JSON from a file, or stdin for `None` / `-`
pub fn read_json(input: Option<&Path>) -> Result<serde_json::Value> {
    let content = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {:?}", path))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    serde_json::from_str(&content).context("Input is not valid JSON")
}

/// A single JSON object or an array of objects
pub fn records_from_json(json: serde_json::Value) -> Result<Vec<Record>> {
    let items = match json {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match record_from_json(item) {
            Some(record) => Ok(record),
            None => bail!("Record #{} is not a JSON object", i + 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_forms::Value;
    use serde_json::json;

    #[test]
    fn test_single_object() {
        let records = records_from_json(json!({ "name": "Acme" })).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], Value::from("Acme"));
    }

    #[test]
    fn test_array_of_objects() {
        let records = records_from_json(json!([{ "a": 1 }, { "a": 2 }])).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_non_object_rejected() {
        let err = records_from_json(json!([{ "a": 1 }, "oops"])).unwrap_err();
        assert_eq!(err.to_string(), "Record #2 is not a JSON object");
    }
}
