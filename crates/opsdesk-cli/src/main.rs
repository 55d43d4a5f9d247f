mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use opsdesk_forms::config::DEFAULT_CONFIG_PATH;
use opsdesk_forms::Config;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "opsdesk")]
#[command(version, about = "Opsdesk CLI - validate and sanitize console form data", long_about = None)]
struct Cli {
    /// Configuration file (defaults to $OPSDESK_CONFIG, then ./opsdesk.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate JSON record(s) against a named schema
    Validate {
        /// Schema name (see `opsdesk schemas`)
        #[arg(short, long)]
        schema: String,

        /// JSON file holding an object or an array of objects; `-` or omitted reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available schemas and their fields
    Schemas {
        /// Only show this schema
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Check an upload against the configured limits
    #[command(name = "check-file")]
    CheckFile {
        /// File name, used in messages
        #[arg(long)]
        name: String,

        /// Size in bytes
        #[arg(long)]
        size: u64,

        /// MIME type
        #[arg(long = "type")]
        mime_type: String,

        /// Override the configured maximum size (bytes)
        #[arg(long)]
        max_size: Option<u64>,

        /// Override the configured allowed types (repeatable)
        #[arg(long = "allow")]
        allowed_types: Vec<String>,
    },

    /// Strip injection markers from text
    Sanitize {
        /// Text to clean
        text: String,
    },

    /// Turn a field name and error fragment into a sentence
    #[command(name = "format-error")]
    FormatError {
        /// Field name in camelCase
        field: String,

        /// Error fragment, e.g. "is required"
        error: String,
    },

    /// Hours between two HH:MM times
    Duration {
        start: String,
        end: String,
    },

    /// Project retainer burn to the end of the period
    Burn {
        #[arg(long)]
        allotted: f64,

        #[arg(long)]
        used: f64,

        /// Period start (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Period end (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Date to project from (defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Aggregate a numeric field across JSON records
    Aggregate {
        /// Field to aggregate
        #[arg(short, long)]
        field: String,

        #[arg(short, long, default_value = "sum")]
        op: AggregateOp,

        /// JSON file holding an array of objects; `-` or omitted reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum AggregateOp {
    Sum,
    Average,
    Count,
    Min,
    Max,
}

fn config_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path
        .or_else(|| std::env::var_os("OPSDESK_CONFIG").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn init_logging(verbose: bool, config: &Config) {
    let level = if verbose {
        Level::DEBUG
    } else {
        std::env::var("OPSDESK_LOG")
            .unwrap_or_else(|_| config.logging.level.clone())
            .parse::<Level>()
            .unwrap_or(Level::WARN)
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let path = config_path(cli.config);
    let config = Config::load(&path)?;
    init_logging(cli.verbose, &config);

    let registry = config
        .registry()
        .with_context(|| format!("Invalid schema definitions in {:?}", path))?;

    match cli.command {
        Commands::Validate { schema, input, json } => {
            commands::validate::execute(&registry, &schema, input.as_deref(), json)
        }
        Commands::Schemas { name } => {
            commands::schemas::execute(&registry, name.as_deref())?;
            Ok(true)
        }
        Commands::CheckFile {
            name,
            size,
            mime_type,
            max_size,
            allowed_types,
        } => {
            let mut constraints = config.uploads.constraints();
            if max_size.is_some() {
                constraints.max_size = max_size;
            }
            if !allowed_types.is_empty() {
                constraints.allowed_types = Some(allowed_types);
            }
            commands::file::execute(&name, size, &mime_type, &constraints)
        }
        Commands::Sanitize { text } => {
            commands::text::sanitize(&text);
            Ok(true)
        }
        Commands::FormatError { field, error } => {
            commands::text::format_error(&field, &error);
            Ok(true)
        }
        Commands::Duration { start, end } => {
            commands::calc::duration(&start, &end)?;
            Ok(true)
        }
        Commands::Burn {
            allotted,
            used,
            start,
            end,
            as_of,
        } => {
            commands::calc::burn(allotted, used, &start, &end, as_of.as_deref())?;
            Ok(true)
        }
        Commands::Aggregate { field, op, input } => {
            commands::calc::aggregate(&field, op.into(), input.as_deref())?;
            Ok(true)
        }
    }
}

impl From<AggregateOp> for opsdesk_forms::Aggregation {
    fn from(op: AggregateOp) -> Self {
        match op {
            AggregateOp::Sum => Self::Sum,
            AggregateOp::Average => Self::Average,
            AggregateOp::Count => Self::Count,
            AggregateOp::Min => Self::Min,
            AggregateOp::Max => Self::Max,
        }
    }
}

/// 0 when everything passed, 1 when input failed validation, 2 on errors
fn exit_status(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    let outcome = run(cli);
    if let Err(e) = &outcome {
        eprintln!("{} {:#}", "error:".red().bold(), e);
    }
    ExitCode::from(exit_status(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(true)), 0);
        assert_eq!(exit_status(&Ok(false)), 1);
        assert_eq!(exit_status(&Err(anyhow::anyhow!("Unknown schema `x`"))), 2);
    }

    #[test]
    fn test_parse_validate_command() {
        let cli = Cli::try_parse_from(["opsdesk", "validate", "--schema", "lead", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Validate { ref schema, input: None, json: true } if schema == "lead"
        ));
    }
}
