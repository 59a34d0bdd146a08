//! Subcommand entry points.
//!
//! Each entry point resolves the connection settings, builds the shared HTTP
//! client and runs one bulk operation to completion. Input and output streams
//! are passed in so the binary can hand over stdin/stdout and tests can use
//! buffers.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use crate::config::{build_target_url, Credentials, GetItemsArgs, GlobalOpts, PutItemsArgs};
use crate::error_handling::{ConfigError, IngestError, ScanError};
use crate::executor::ReqwestExecutor;
use crate::export::{build_writer, is_broken_pipe};
use crate::ingest::{IngestPipeline, IngestReport};
use crate::initialization::init_client;
use crate::reader::build_reader;
use crate::scan::{ScanDriver, ScanOptions, ScanReport};
use crate::table::TableClient;

/// Exit status for invalid configuration.
pub const EXIT_CONFIG: i32 = 2;
/// Exit status for any other failure.
pub const EXIT_FAILURE: i32 = 1;

/// Builds the table client for `path` from the global options.
///
/// # Errors
///
/// Returns a `ConfigError` if the server is missing or malformed, or an
/// initialization error if the HTTP client cannot be built.
pub fn table_client(global: &GlobalOpts, path: &str) -> Result<TableClient<ReqwestExecutor>> {
    let server = global.server.as_deref().ok_or(ConfigError::MissingServer)?;
    let url = build_target_url(server, path)?;
    let credentials = Credentials::from_args_or_env(
        global.user.clone(),
        global.password.clone(),
        global.token.clone(),
    );
    let client = init_client(Duration::from_secs(global.timeout_seconds))
        .context("Failed to initialize HTTP client")?;
    Ok(TableClient::new(
        ReqwestExecutor::new(client),
        url,
        credentials.into_authorization(),
    ))
}

/// Runs `putitems`: streams records from `input` into the table.
///
/// The server and key settings are validated before any input is read.
///
/// # Errors
///
/// Returns the configuration, input or request failure that stopped the run.
/// Records written before the failure stay written.
pub async fn run_put_items<R>(
    global: &GlobalOpts,
    args: &PutItemsArgs,
    input: R,
) -> Result<IngestReport>
where
    R: BufRead + Send + 'static,
{
    let client = table_client(global, &args.path)?;
    info!("Writing to {} with {} workers", client.url(), args.workers);
    let mut reader = build_reader(args.input, args.key.as_deref(), input)?;
    let pipeline = IngestPipeline::new(Arc::new(client), args.workers);
    let report = pipeline.run(reader.as_mut()).await?;
    Ok(report)
}

/// Runs `getitems`: writes every record of the table to `output`.
///
/// # Errors
///
/// Returns the configuration, request, decode or write failure that stopped
/// the scan. Pages written before the failure stay written.
pub async fn run_get_items<W>(
    global: &GlobalOpts,
    args: &GetItemsArgs,
    output: W,
) -> Result<ScanReport>
where
    W: Write + Send + 'static,
{
    let client = table_client(global, &args.path)?;
    info!("Reading from {}", client.url());
    let mut writer = build_writer(args.output, output);
    let mut driver = ScanDriver::new(ScanOptions {
        attributes: args.attributes.clone(),
        filter: args.filter.clone(),
        marker: args.marker.clone(),
    });
    let report = driver.run(&client, writer.as_mut()).await?;
    Ok(report)
}

/// Maps a failure to the process exit status.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let is_config = err.downcast_ref::<ConfigError>().is_some()
        || matches!(
            err.downcast_ref::<IngestError>(),
            Some(IngestError::Config(_))
        );
    if is_config {
        EXIT_CONFIG
    } else {
        EXIT_FAILURE
    }
}

/// True if the scan stopped because its output pipe was closed downstream.
///
/// The binary exits successfully in that case, like a command killed by
/// `SIGPIPE` would in a shell pipeline.
pub fn stopped_by_closed_output(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ScanError>(), Some(ScanError::Write(e)) if is_broken_pipe(e))
}
