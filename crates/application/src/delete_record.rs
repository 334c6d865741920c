//! Delete Record Use Case

use std::collections::BTreeMap;
use std::sync::Arc;

use rowdeck_domain::{
    RecordId,
    request::{Headers, RequestSpec, record_url},
};
use tracing::debug;
use url::Url;

use crate::error::DeleteError;
use crate::ports::HttpClient;

/// Builds `DELETE {endpoint}/{id}` with the caller's headers.
///
/// # Errors
///
/// Returns `DeleteError::InvalidUrl` if the endpoint cannot take a path
/// segment.
pub fn delete_request(
    endpoint: &Url,
    id: &RecordId,
    custom_headers: &BTreeMap<String, String>,
    timeout_ms: u64,
) -> Result<RequestSpec, DeleteError> {
    let url = record_url(endpoint, id)?;
    Ok(RequestSpec::delete(url)
        .with_headers(Headers::from(custom_headers))
        .with_timeout(timeout_ms))
}

/// Use case for removing one record remotely.
pub struct DeleteRecord<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> DeleteRecord<C> {
    /// Creates the use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes a delete request. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DeleteError` on transport failure or a non-success status.
    pub async fn remove(&self, request: &RequestSpec) -> Result<(), DeleteError> {
        debug!(event = "records.delete_started", url = %request.url);

        let response = self.client.execute(request).await?;
        if !response.is_success() {
            return Err(DeleteError::Status(response.status));
        }

        debug!(event = "records.delete_completed", url = %request.url);
        Ok(())
    }
}
