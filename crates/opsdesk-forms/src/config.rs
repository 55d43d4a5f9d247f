// File: src/config.rs
// Purpose: Configuration parsing from opsdesk.toml

use crate::error::SchemaError;
use crate::file::FileConstraints;
use crate::schema::{SchemaRegistry, SchemaSpec};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "opsdesk.toml";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub uploads: UploadConfig,

    /// Extra schemas, addressable by name next to the built-in ones
    #[serde(default)]
    pub schemas: Vec<SchemaSpec>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`
    #[serde(default = "default_level")]
    pub level: String,
}

/// Upload limits applied when a caller has none of its own
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    #[serde(default)]
    pub allowed_types: Option<Vec<String>>,

    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_max_size() -> u64 {
    10 * 1024 * 1024
}

fn default_max_files() -> usize {
    10
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            allowed_types: None,
            max_files: default_max_files(),
        }
    }
}

impl UploadConfig {
    pub fn constraints(&self) -> FileConstraints {
        FileConstraints {
            max_size: Some(self.max_size),
            allowed_types: self.allowed_types.clone(),
            max_files: Some(self.max_files),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        tracing::info!(
            "Loaded config from {:?} ({} custom schemas)",
            path,
            config.schemas.len()
        );
        Ok(config)
    }

    /// Load configuration from default path (./opsdesk.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// Built-in schemas plus the ones defined here
    pub fn registry(&self) -> Result<SchemaRegistry, SchemaError> {
        SchemaRegistry::from_specs(&self.schemas)
    }
}
