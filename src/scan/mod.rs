//! Scan driver.
//!
//! Drains a table with repeated `GetItems` calls. Each page carries an opaque
//! marker that resumes the scan where the page ended; the driver passes it back
//! verbatim until the server marks a page as the last one.
//!
//! Output is written page by page. A failure aborts the scan without rolling
//! back what was already written.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error_handling::ScanError;
use crate::executor::RequestExecutor;
use crate::export::ItemWriter;
use crate::record::Record;
use crate::table::TableClient;

/// Value of `LastItemIncluded` on the final page.
const LAST_PAGE: &str = "TRUE";

/// Body of a `GetItems` request. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetItemsRequest {
    /// Continuation marker; empty starts the scan
    #[serde(rename = "Marker", skip_serializing_if = "String::is_empty")]
    pub marker: String,
    /// Comma-separated attribute names to return
    #[serde(rename = "AttributesToGet", skip_serializing_if = "String::is_empty")]
    pub attributes_to_get: String,
    /// Server-side filter expression
    #[serde(rename = "FilterExpression", skip_serializing_if = "String::is_empty")]
    pub filter_expression: String,
}

/// One scan page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetItemsResponse {
    /// `"TRUE"` on the final page
    pub last_item_included: String,
    /// Marker for the next page; unused on the final page
    pub next_marker: String,
    /// Number of items in this page, as reported by the server
    pub num_items: usize,
    /// Items in server order
    pub items: Vec<Record>,
}

impl GetItemsResponse {
    /// True if this is the final page.
    pub fn is_last_page(&self) -> bool {
        self.last_item_included == LAST_PAGE
    }
}

/// Scan parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Attribute selection list
    pub attributes: Option<String>,
    /// Filter expression
    pub filter: Option<String>,
    /// Marker to resume from instead of the start
    pub marker: Option<String>,
}

/// Driver state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// More pages remain; the next request carries `marker`
    Scanning {
        /// Marker for the next request
        marker: String,
    },
    /// The final page has been written
    Done,
}

/// Totals for a completed scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Pages fetched
    pub pages: usize,
    /// Records written
    pub items: usize,
}

/// Sequential pagination state machine.
#[derive(Debug, Clone)]
pub struct ScanDriver {
    state: ScanState,
    attributes: String,
    filter: String,
    report: ScanReport,
}

impl ScanDriver {
    /// Creates a driver positioned at `options.marker`, or the start of the table.
    pub fn new(options: ScanOptions) -> Self {
        Self {
            state: ScanState::Scanning {
                marker: options.marker.unwrap_or_default(),
            },
            attributes: options.attributes.unwrap_or_default(),
            filter: options.filter.unwrap_or_default(),
            report: ScanReport::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Totals so far.
    pub fn report(&self) -> ScanReport {
        self.report
    }

    /// Fetches and writes one page. Does nothing once the scan is done.
    ///
    /// Returns the number of records written.
    pub async fn step<E, W>(
        &mut self,
        client: &TableClient<E>,
        writer: &mut W,
    ) -> Result<usize, ScanError>
    where
        E: RequestExecutor,
        W: ItemWriter + ?Sized,
    {
        let marker = match &self.state {
            ScanState::Scanning { marker } => marker.clone(),
            ScanState::Done => return Ok(0),
        };

        let request = GetItemsRequest {
            marker,
            attributes_to_get: self.attributes.clone(),
            filter_expression: self.filter.clone(),
        };
        let body = serde_json::to_vec(&request).map_err(ScanError::Encode)?;
        let response = client.get_items(body).await?;
        let page: GetItemsResponse =
            serde_json::from_slice(&response.body).map_err(|source| ScanError::Decode {
                url: client.url().to_string(),
                source,
            })?;

        for item in &page.items {
            writer.write(item)?;
        }
        writer.flush()?;

        let written = page.items.len();
        self.report.pages += 1;
        self.report.items += written;

        if page.is_last_page() {
            self.state = ScanState::Done;
        } else {
            if page.next_marker.is_empty() {
                warn!(
                    "Page {} is not the last one but has no next marker; the scan restarts from the beginning",
                    self.report.pages
                );
            }
            debug!(
                "Page {} done ({written} items), next marker: {}",
                self.report.pages, page.next_marker
            );
            self.state = ScanState::Scanning {
                marker: page.next_marker,
            };
        }
        Ok(written)
    }

    /// Runs the scan to completion.
    ///
    /// # Errors
    ///
    /// Returns the first request, decode or write failure. Pages written before
    /// the failure stay written.
    pub async fn run<E, W>(
        &mut self,
        client: &TableClient<E>,
        writer: &mut W,
    ) -> Result<ScanReport, ScanError>
    where
        E: RequestExecutor,
        W: ItemWriter + ?Sized,
    {
        while self.state != ScanState::Done {
            self.step(client, writer).await?;
        }
        info!(
            "Scan complete: {} items in {} pages",
            self.report.items, self.report.pages
        );
        Ok(self.report)
    }
}
