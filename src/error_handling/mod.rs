//! Error handling.
//!
//! Errors are grouped by where they arise:
//! - **Configuration**: bad arguments, detected before any I/O
//! - **Request**: unexpected HTTP status or transport failure
//! - **Read/Write**: malformed input or a failing output sink
//! - **Ingest/Scan**: the errors surfaced by the two bulk operations

mod types;

// Re-export public API
pub use types::{
    ConfigError, IngestError, InitializationError, ReadError, RequestError, ScanError,
    TransportError, WriteError,
};
