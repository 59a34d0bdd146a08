//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid or missing configuration, reported before any I/O.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No server address on the command line or in `V3IO_API`.
    #[error("please specify --server or define V3IO_API")]
    MissingServer,

    /// CSV input needs a key column.
    #[error("'--input csv' must be specified in conjunction with --key")]
    MissingKey,

    /// `--workers` is not a positive integer.
    #[error("could not parse number of workers from '{value}': {reason}")]
    InvalidWorkerCount {
        /// Raw value as given
        value: String,
        /// Parser message
        reason: String,
    },

    /// `--server` does not form a valid URL.
    #[error("invalid server address '{server}': {reason}")]
    InvalidServerUrl {
        /// Raw server value
        server: String,
        /// Parser message
        reason: String,
    },
}

/// Failure inside a request executor (DNS, connect, TLS, timeout).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Error raised by `reqwest`.
    #[error(transparent)]
    Http(#[from] ReqwestError),

    /// Error raised by any other executor.
    #[error("{0}")]
    Other(String),
}

/// Failure of a single table API call.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The server answered with a status the operation does not accept.
    #[error("got unexpected response code {status} from {url}{} for request:\n{request}", format_body(.body))]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Target URL
        url: String,
        /// Response body, possibly empty
        body: String,
        /// Rendered outbound request (secrets redacted)
        request: String,
    },

    /// The request never produced a response.
    #[error("failed to send request to {url}")]
    Transport {
        /// Target URL
        url: String,
        /// Underlying executor failure
        #[source]
        source: TransportError,
    },
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": \n{body}\n")
    }
}

/// Errors reading the input stream.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The CSV header line could not be read.
    #[error("failed to read header")]
    Header(#[source] csv::Error),

    /// CSV input ended before a header line.
    #[error("failed to read header: input is empty")]
    MissingHeader,

    /// A CSV data row could not be parsed.
    #[error("failed to read CSV row")]
    Csv(#[from] csv::Error),

    /// The underlying stream failed.
    #[error("failed to read input")]
    Io(#[from] std::io::Error),

    /// A JSON input line is not a JSON object.
    #[error("invalid JSON on input line {line}")]
    Decode {
        /// 1-based input line number
        line: usize,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// A CSV row could not be serialized into a request body.
    #[error("failed to encode record")]
    Encode(#[source] serde_json::Error),
}

/// Errors writing records to the output sink.
#[derive(Error, Debug)]
pub enum WriteError {
    /// The sink failed.
    #[error("failed to write output")]
    Io(#[from] std::io::Error),

    /// The CSV writer failed.
    #[error("failed to write CSV output")]
    Csv(#[from] csv::Error),

    /// A record could not be rendered as JSON.
    #[error("failed to render JSON output")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by the ingestion pipeline.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The pipeline was configured inconsistently.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading the input stream failed.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// A write request failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// A worker ended without reporting a result (it panicked).
    #[error("worker {worker} exited without reporting a result")]
    WorkerLost {
        /// Index of the worker
        worker: usize,
    },
}

/// Errors returned by the scan driver.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A scan request failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The scan request body could not be serialized.
    #[error("failed to encode scan request")]
    Encode(#[source] serde_json::Error),

    /// A scan response body is not a valid page.
    #[error("failed to decode scan response from {url}")]
    Decode {
        /// Target URL
        url: String,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Writing returned records failed.
    #[error(transparent)]
    Write(#[from] WriteError),
}
