//! v3io_cli library: bulk table reads and writes over the v3io web API
//!
//! This library provides the two bulk operations behind the `v3io_cli` binary:
//!
//! - **Ingestion** ([`ingest`]): streams records from a reader and writes them
//!   with parallel `PutItem` requests, stopping admission at the first failure.
//! - **Scanning** ([`scan`]): drains a table with `GetItems`, following the
//!   server's continuation marker page by page.
//!
//! Records travel as JSON lines or CSV ([`reader`], [`export`]). HTTP goes
//! through the [`executor::RequestExecutor`] seam, so both operations can be
//! driven without a network.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use v3io_cli::config::{Cli, Command};
//! use v3io_cli::run_get_items;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let cli = Cli::parse_from(["v3io_cli", "-s", "webapi:8081", "getitems", "users/"]);
//! if let Command::GetItems(args) = &cli.command {
//!     let report = run_get_items(&cli.global, args, std::io::stdout()).await?;
//!     eprintln!("{} items in {} pages", report.items, report.pages);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod error_handling;
pub mod executor;
pub mod export;
pub mod ingest;
pub mod initialization;
pub mod reader;
pub mod record;
mod run;
pub mod scan;
pub mod table;

// Re-export public API
pub use config::{Cli, Command, LogFormat, LogLevel};
pub use ingest::IngestReport;
pub use record::{AttributeValue, Record};
pub use run::{
    exit_code, run_get_items, run_put_items, stopped_by_closed_output, table_client, EXIT_CONFIG,
    EXIT_FAILURE,
};
pub use scan::ScanReport;
