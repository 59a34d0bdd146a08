//! HTTP header name constants.
//!
//! This module defines the request headers understood by the table API.

/// Basic authorization header
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// Session key (access key) header; takes precedence over basic auth
pub const HEADER_SESSION_KEY: &str = "X-v3io-session-key";
/// Selects the remote operation
pub const HEADER_FUNCTION: &str = "X-v3io-function";

/// Function selector for single-record writes
pub const FUNCTION_PUT_ITEM: &str = "PutItem";
/// Function selector for paginated scans
pub const FUNCTION_GET_ITEMS: &str = "GetItems";

/// Headers whose values are replaced when a request is echoed in diagnostics.
pub const REDACTED_HEADERS: &[&str] = &[HEADER_AUTHORIZATION, HEADER_SESSION_KEY];
