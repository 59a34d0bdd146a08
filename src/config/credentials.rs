//! Credential resolution and authorization headers.

use base64::Engine;

use crate::config::constants::{ENV_ACCESS_KEY, ENV_PASSWORD, ENV_USERNAME};
use crate::config::headers::{HEADER_AUTHORIZATION, HEADER_SESSION_KEY};

/// Credentials as given on the command line or found in the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// User name for basic auth
    pub user: String,
    /// Password for basic auth
    pub password: String,
    /// Session key; wins over user/password when non-empty
    pub token: String,
}

impl Credentials {
    /// Resolves credentials from CLI values, falling back to the environment.
    ///
    /// The environment is consulted only when neither a token nor a password was
    /// given on the command line, and then it replaces all three values.
    /// `lookup` is `std::env::var` in production and a map in tests.
    pub fn resolve<F>(
        user: Option<String>,
        password: Option<String>,
        token: Option<String>,
        lookup: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = token.unwrap_or_default();
        let password = password.unwrap_or_default();
        if token.is_empty() && password.is_empty() {
            return Self {
                user: lookup(ENV_USERNAME).unwrap_or_default(),
                password: lookup(ENV_PASSWORD).unwrap_or_default(),
                token: lookup(ENV_ACCESS_KEY).unwrap_or_default(),
            };
        }
        Self {
            user: user.unwrap_or_default(),
            password,
            token,
        }
    }

    /// Resolves credentials against the process environment.
    pub fn from_args_or_env(
        user: Option<String>,
        password: Option<String>,
        token: Option<String>,
    ) -> Self {
        Self::resolve(user, password, token, |name| std::env::var(name).ok())
    }

    /// Converts into the header that authenticates each request.
    pub fn into_authorization(self) -> Authorization {
        if self.token.is_empty() {
            let encoded = base64::engine::general_purpose::STANDARD
                .encode(format!("{}:{}", self.user, self.password));
            Authorization::Basic(format!("Basic {encoded}"))
        } else {
            Authorization::SessionKey(self.token)
        }
    }
}

/// Authorization carried by every request. The two forms are mutually exclusive.
#[derive(Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Full `Authorization` header value, `Basic <base64(user:pass)>`
    Basic(String),
    /// Access key sent as `X-v3io-session-key`
    SessionKey(String),
}

impl Authorization {
    /// Header name and value for this authorization.
    pub fn header(&self) -> (&'static str, &str) {
        match self {
            Authorization::Basic(value) => (HEADER_AUTHORIZATION, value),
            Authorization::SessionKey(token) => (HEADER_SESSION_KEY, token),
        }
    }
}

impl std::fmt::Debug for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authorization::Basic(_) => f.write_str("Basic(<redacted>)"),
            Authorization::SessionKey(_) => f.write_str("SessionKey(<redacted>)"),
        }
    }
}
