//! Target URL construction.

use crate::config::constants::DEFAULT_SCHEME;
use crate::error_handling::ConfigError;

/// Builds the table URL for a server address and a table path.
///
/// Adds `http://` if the server has no http/https scheme, joins the table path
/// onto the server's base path, cleans it lexically (`.`, `..`, repeated
/// slashes) and terminates it with a slash, which the table API requires.
///
/// # Errors
///
/// Returns `ConfigError::MissingServer` for an empty server and
/// `ConfigError::InvalidServerUrl` if the result does not parse.
pub fn build_target_url(server: &str, table_path: &str) -> Result<String, ConfigError> {
    let server = server.trim();
    if server.is_empty() {
        return Err(ConfigError::MissingServer);
    }
    let normalized = if !server.starts_with("http://") && !server.starts_with("https://") {
        format!("{DEFAULT_SCHEME}{server}")
    } else {
        server.to_string()
    };

    let mut parsed = ::url::Url::parse(&normalized).map_err(|e| ConfigError::InvalidServerUrl {
        server: server.to_string(),
        reason: e.to_string(),
    })?;

    let joined = format!("{}/{}", parsed.path(), table_path);
    let cleaned = clean_path(&joined);
    if cleaned == "/" {
        parsed.set_path("/");
    } else {
        parsed.set_path(&format!("{cleaned}/"));
    }
    Ok(parsed.to_string())
}

/// Lexically cleans an absolute slash-separated path.
fn clean_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    format!("/{}", parts.join("/"))
}
