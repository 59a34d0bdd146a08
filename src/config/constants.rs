//! Configuration constants.
//!
//! This module defines the defaults and protocol constants used throughout the
//! application: queue sizes, worker counts, timeouts and environment variable names.

/// Capacity of each ingestion worker's queue.
///
/// When a worker falls behind, the dispatcher blocks on its full queue, which
/// throttles reading from the input stream.
pub const WORKER_QUEUE_SIZE: usize = 64;

/// Default number of ingestion workers (and therefore in-flight PUT requests).
pub const DEFAULT_WORKERS: &str = "16";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("v3io_cli/", env!("CARGO_PKG_VERSION"));

/// Scheme assumed when `--server` has none.
pub const DEFAULT_SCHEME: &str = "http://";

/// Reserved item-name attribute, always rendered as the first CSV column.
pub const ITEM_NAME_ATTRIBUTE: &str = "__name";

// Environment variables
/// Server address fallback for `--server`
pub const ENV_API: &str = "V3IO_API";
/// Session key fallback, used only when no credentials are given on the command line
pub const ENV_ACCESS_KEY: &str = "V3IO_ACCESS_KEY";
/// Username fallback
pub const ENV_USERNAME: &str = "V3IO_USERNAME";
/// Password fallback
pub const ENV_PASSWORD: &str = "V3IO_PASSWORD";
