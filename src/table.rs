//! Table API client.
//!
//! Binds a table URL, the authorization and an executor, and issues the two
//! table functions used by the bulk operations (`PutItem` and `GetItems`).

use log::debug;
use reqwest::Method;

use crate::config::{Authorization, FUNCTION_GET_ITEMS, FUNCTION_PUT_ITEM, HEADER_FUNCTION};
use crate::error_handling::RequestError;
use crate::executor::{HttpRequest, HttpResponse, RequestExecutor};

/// Statuses accepted for `PutItem`
pub const PUT_ITEM_OK: &[u16] = &[200, 204];
/// Statuses accepted for `GetItems`
pub const GET_ITEMS_OK: &[u16] = &[200];

/// Client for one table.
#[derive(Debug, Clone)]
pub struct TableClient<E> {
    executor: E,
    url: String,
    auth: Authorization,
}

impl<E: RequestExecutor> TableClient<E> {
    /// Creates a client for the table at `url`.
    pub fn new(executor: E, url: impl Into<String>, auth: Authorization) -> Self {
        Self {
            executor,
            url: url.into(),
            auth,
        }
    }

    /// Table URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The executor requests go through.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn build_request(&self, function: &str, body: Vec<u8>) -> HttpRequest {
        let (auth_name, auth_value) = self.auth.header();
        HttpRequest::new(Method::PUT, self.url.clone())
            .with_header(auth_name, auth_value)
            .with_header(HEADER_FUNCTION, function)
            .with_body(body)
    }

    async fn call(
        &self,
        function: &str,
        body: Vec<u8>,
        accepted: &[u16],
    ) -> Result<HttpResponse, RequestError> {
        let request = self.build_request(function, body);
        let response = self
            .executor
            .execute(&request)
            .await
            .map_err(|source| RequestError::Transport {
                url: self.url.clone(),
                source,
            })?;

        if !accepted.contains(&response.status) {
            return Err(RequestError::UnexpectedStatus {
                status: response.status,
                url: self.url.clone(),
                body: response.body_text(),
                request: request.to_string(),
            });
        }
        debug!("{function} {} -> {}", self.url, response.status);
        Ok(response)
    }

    /// Writes one encoded record. Accepts 200 and 204.
    pub async fn put_item(&self, body: Vec<u8>) -> Result<(), RequestError> {
        self.call(FUNCTION_PUT_ITEM, body, PUT_ITEM_OK).await?;
        Ok(())
    }

    /// Requests one scan page. Accepts 200 only.
    pub async fn get_items(&self, body: Vec<u8>) -> Result<HttpResponse, RequestError> {
        self.call(FUNCTION_GET_ITEMS, body, GET_ITEMS_OK).await
    }
}
