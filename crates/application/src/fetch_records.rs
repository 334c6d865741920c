//! Fetch Records Use Case
//!
//! Reads the record collection from its endpoint and normalizes the body
//! into a list of records.

use std::collections::BTreeMap;
use std::sync::Arc;

use rowdeck_domain::{
    PayloadMode, Record,
    request::{Headers, RequestSpec},
};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::FetchError;
use crate::ports::HttpClient;

/// Content type sent with every list request unless overridden.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Builds the list request: `Content-Type: application/json` with the
/// caller's headers merged over it.
#[must_use]
pub fn list_request(
    endpoint: Url,
    custom_headers: &BTreeMap<String, String>,
    timeout_ms: u64,
) -> RequestSpec {
    let mut headers = Headers::new();
    headers.set("Content-Type", JSON_CONTENT_TYPE);
    RequestSpec::get(endpoint)
        .with_headers(headers.merged_with(custom_headers))
        .with_timeout(timeout_ms)
}

/// Turns a decoded response body into records.
///
/// In `Array` mode the body itself must be an array; in `Nested` mode the
/// array is read from the `data` field. Anything else yields an empty
/// list. Array elements that are not objects are skipped.
#[must_use]
pub fn normalize_payload(body: Value, mode: PayloadMode) -> Vec<Record> {
    let items = match (mode, body) {
        (PayloadMode::Array, Value::Array(items)) => items,
        (PayloadMode::Nested, Value::Object(mut fields)) => match fields.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    let total = items.len();
    let records: Vec<Record> = items.into_iter().filter_map(Record::from_value).collect();
    if records.len() != total {
        warn!(
            event = "records.non_object_skipped",
            skipped = total - records.len(),
            kept = records.len()
        );
    }
    records
}

/// Use case for loading the record list.
pub struct FetchRecords<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> FetchRecords<C> {
    /// Creates the use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes a list request and normalizes the body.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport failure, a non-success status, or
    /// a body that is not valid JSON.
    pub async fn load(
        &self,
        request: &RequestSpec,
        mode: PayloadMode,
    ) -> Result<Vec<Record>, FetchError> {
        debug!(event = "records.fetch_started", url = %request.url);

        let response = self.client.execute(request).await?;
        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        let body: Value = serde_json::from_slice(&response.body)
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        let records = normalize_payload(body, mode);

        debug!(
            event = "records.fetch_completed",
            url = %request.url,
            count = records.len()
        );
        Ok(records)
    }
}
