//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `v3io_cli` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing summary and exit status
//!
//! Records flow through stdin/stdout; everything else goes to stderr.

use std::io::{self, BufReader};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use v3io_cli::initialization::init_logger_with;
use v3io_cli::{exit_code, run_get_items, run_put_items, stopped_by_closed_output, Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials and the server address may live in a .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.global.log_level.clone().into(), cli.global.log_format.clone())
        .context("Failed to initialize logger")?;

    let outcome = match &cli.command {
        Command::PutItems(args) => {
            run_put_items(&cli.global, args, BufReader::new(io::stdin()))
                .await
                .map(|report| {
                    eprintln!(
                        "Wrote {} record{} with {} worker{}",
                        report.written,
                        if report.written == 1 { "" } else { "s" },
                        args.workers,
                        if args.workers.get() == 1 { "" } else { "s" },
                    );
                })
        }
        Command::GetItems(args) => {
            run_get_items(&cli.global, args, io::stdout())
                .await
                .map(|report| {
                    eprintln!(
                        "Read {} item{} in {} page{}",
                        report.items,
                        if report.items == 1 { "" } else { "s" },
                        report.pages,
                        if report.pages == 1 { "" } else { "s" },
                    );
                })
        }
    };

    if let Err(e) = outcome {
        // Downstream closed stdout (`getitems | head`); the output it wanted was written
        if stopped_by_closed_output(&e) {
            return Ok(());
        }
        eprintln!("v3io_cli error: {e:#}");
        process::exit(exit_code(&e));
    }
    Ok(())
}
