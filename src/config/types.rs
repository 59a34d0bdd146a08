//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::num::NonZeroUsize;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS, ENV_API};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Encoding of records read by `putitems`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One `{"Key": {...}, "Item": {...}}` document per line
    Json,
    /// Header line plus comma-separated rows, every value a string attribute
    Csv,
}

/// Encoding of records written by `getitems`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One flat JSON object per line, numbers unwrapped
    Json,
    /// Header line plus comma-separated rows
    Csv,
}

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Load a CSV file keyed by the `name` column
/// v3io_cli -s webapi:8081 putitems users/table -i csv -k name < users.csv
///
/// # Dump a table as CSV, selecting two attributes
/// v3io_cli -s webapi:8081 getitems users/table -o csv -a name,age
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "v3io_cli",
    version,
    about = "V3IO command-line interface for bulk table reads and writes"
)]
pub struct Cli {
    /// Options shared by every subcommand
    #[command(flatten)]
    pub global: GlobalOpts,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Connection, credential and logging options.
#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// V3IO API address (scheme defaults to http)
    #[arg(short, long, global = true, env = ENV_API)]
    pub server: Option<String>,

    /// User name
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Password
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// V3IO access key (session token)
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write v3io tables from stdin
    #[command(name = "putitems")]
    PutItems(PutItemsArgs),
    /// Read v3io tables to stdout
    #[command(name = "getitems")]
    GetItems(GetItemsArgs),
}

/// Options for `putitems`.
#[derive(Debug, Clone, Args)]
pub struct PutItemsArgs {
    /// Table path
    pub path: String,

    /// Input format
    #[arg(short, long = "input", value_enum, default_value_t = InputFormat::Json)]
    pub input: InputFormat,

    /// Key attribute (CSV input only)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Number of workers
    #[arg(short, long, default_value = DEFAULT_WORKERS, value_parser = parse_worker_count)]
    pub workers: NonZeroUsize,
}

/// Options for `getitems`.
#[derive(Debug, Clone, Args)]
pub struct GetItemsArgs {
    /// Table path
    pub path: String,

    /// Output format
    #[arg(short, long = "output", value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Attributes to request (comma-separated)
    #[arg(short, long)]
    pub attributes: Option<String>,

    /// Filter expression
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Resume a scan from a previously logged marker
    #[arg(long)]
    pub marker: Option<String>,
}

/// Parses the `--workers` value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidWorkerCount` if the value is not a positive integer.
pub fn parse_worker_count(value: &str) -> Result<NonZeroUsize, ConfigError> {
    value
        .trim()
        .parse::<NonZeroUsize>()
        .map_err(|e| ConfigError::InvalidWorkerCount {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
