//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Headers, HttpMethod};
use crate::error::{DomainError, DomainResult};
use crate::record::RecordId;
use crate::settings::DEFAULT_TIMEOUT_MS;

/// Complete specification for an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: Url,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

const fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl RequestSpec {
    /// Creates a GET request.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(url: Url) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Creates a request with no headers and the default timeout.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets the headers.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Builds `{endpoint}/{id}`, encoding the id as a single path segment.
///
/// # Errors
///
/// Returns `InvalidUrl` if the endpoint cannot have path segments
/// (for example a `mailto:` URL).
pub fn record_url(endpoint: &Url, id: &RecordId) -> DomainResult<Url> {
    let mut url = endpoint.clone();
    url.path_segments_mut()
        .map_err(|()| DomainError::InvalidUrl(format!("cannot append path to {endpoint}")))?
        .pop_if_empty()
        .push(&id.to_string());
    Ok(url)
}
