//! Request execution boundary.
//!
//! The bulk operations never touch an HTTP client directly: they build an
//! [`HttpRequest`] and hand it to a [`RequestExecutor`]. Connection pooling, TLS
//! and timeouts are the executor's concern. [`ReqwestExecutor`] is the production
//! implementation; tests substitute their own.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::trace;
use reqwest::Method;

use crate::config::REDACTED_HEADERS;
use crate::error_handling::TransportError;

/// An outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute target URL
    pub url: String,
    /// Header names and values, sent in order
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Creates a request with no headers and an empty body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Renders the request for diagnostics with credential headers redacted.
impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.method, self.url)?;
        for (name, value) in &self.headers {
            let redacted = REDACTED_HEADERS
                .iter()
                .any(|h| h.eq_ignore_ascii_case(name));
            if redacted {
                writeln!(f, "{name}: <redacted>")?;
            } else {
                writeln!(f, "{name}: {value}")?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", String::from_utf8_lossy(&self.body))
    }
}

/// A completed exchange: status code and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Body as text, lossily decoded.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Issues a single HTTP request.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Sends `request` and returns the response, or a transport failure.
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: RequestExecutor + ?Sized> RequestExecutor for Arc<T> {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// Executor backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Arc<reqwest::Client>,
}

impl ReqwestExecutor {
    /// Wraps a configured client.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RequestExecutor for ReqwestExecutor {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        trace!("{} {} ({} bytes)", request.method, request.url, request.body.len());
        let mut builder = self.client.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder.body(request.body.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}
