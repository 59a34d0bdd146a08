//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (queue sizes, defaults, environment variable names)
//! - HTTP header name constants
//! - CLI option types and parsing
//! - Credential resolution and target URL construction

mod constants;
mod credentials;
mod headers;
mod types;
mod url;

// Re-export all constants
pub use constants::*;
pub use credentials::{Authorization, Credentials};
pub use headers::*;
pub use types::{
    parse_worker_count, Cli, Command, GetItemsArgs, GlobalOpts, InputFormat, LogFormat, LogLevel,
    OutputFormat, PutItemsArgs,
};
pub use self::url::build_target_url;
