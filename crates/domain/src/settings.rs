//! View definition.
//!
//! A view definition describes one record table: where its records come
//! from, which columns and detail fields to show, and which actions are
//! enabled. It is usually loaded from a JSON file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::column::{ColumnDescriptor, DetailFieldDescriptor};
use crate::error::{DomainError, DomainResult};

/// Default message shown when the settled list is empty.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data found";
/// Default message shown while a fetch is outstanding.
pub const DEFAULT_LOADING_MESSAGE: &str = "Loading...";
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default lifetime of a notice in milliseconds.
pub const DEFAULT_NOTICE_DURATION_MS: u64 = 3_000;

/// Shape of the list response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadMode {
    /// The body is the array of records.
    #[default]
    Array,
    /// The body is an object whose `data` field holds the array.
    Nested,
}

/// Everything needed to display one record table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Title of the list view.
    pub title: String,
    /// Title of the detail view.
    #[serde(default)]
    pub detail_title: String,
    /// Collection endpoint, absolute or relative to `base_url`.
    pub endpoint: String,
    /// Base URL for relative endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Shape of the list response.
    #[serde(default)]
    pub payload: PayloadMode,
    /// List view columns.
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    /// Detail view fields.
    #[serde(default)]
    pub detail_fields: Vec<DetailFieldDescriptor>,
    /// Whether rows and the detail view offer a delete action.
    #[serde(default = "default_true")]
    pub enable_delete: bool,
    /// Whether the list view offers a refresh action.
    #[serde(default = "default_true")]
    pub enable_refresh: bool,
    /// Extra headers sent with every request.
    #[serde(default)]
    pub custom_headers: BTreeMap<String, String>,
    /// Labels of additional actions shown next to refresh.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_actions: Vec<String>,
    /// Message shown when the list is empty.
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
    /// Message shown while loading.
    #[serde(default = "default_loading_message")]
    pub loading_message: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// How long notices stay visible, in milliseconds.
    #[serde(default = "default_notice_duration_ms")]
    pub notice_duration_ms: u64,
}

const fn default_true() -> bool {
    true
}

fn default_empty_message() -> String {
    DEFAULT_EMPTY_MESSAGE.to_string()
}

fn default_loading_message() -> String {
    DEFAULT_LOADING_MESSAGE.to_string()
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

const fn default_notice_duration_ms() -> u64 {
    DEFAULT_NOTICE_DURATION_MS
}

impl ViewSettings {
    /// Creates settings with defaults for everything but title and endpoint.
    pub fn new(title: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail_title: String::new(),
            endpoint: endpoint.into(),
            base_url: None,
            payload: PayloadMode::Array,
            columns: Vec::new(),
            detail_fields: Vec::new(),
            enable_delete: true,
            enable_refresh: true,
            custom_headers: BTreeMap::new(),
            extra_actions: Vec::new(),
            empty_message: default_empty_message(),
            loading_message: default_loading_message(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
        }
    }

    /// Resolves the endpoint to an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the endpoint is neither absolute nor
    /// resolvable against `base_url`.
    pub fn resolve_endpoint(&self) -> DomainResult<Url> {
        resolve_endpoint(&self.endpoint, self.base_url.as_deref())
    }
}

/// Resolves `endpoint` against an optional base URL.
///
/// The base is treated as a directory, so `https://h/api` joined with
/// `users` gives `https://h/api/users`.
///
/// # Errors
///
/// Returns `InvalidUrl` if no absolute URL can be formed.
pub fn resolve_endpoint(endpoint: &str, base_url: Option<&str>) -> DomainResult<Url> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(DomainError::InvalidUrl("endpoint is empty".to_string()));
    }

    match Url::parse(endpoint) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let Some(base) = base_url else {
                return Err(DomainError::InvalidUrl(format!(
                    "relative endpoint without base URL: {endpoint}"
                )));
            };
            let base = if base.ends_with('/') {
                Url::parse(base)
            } else {
                Url::parse(&format!("{base}/"))
            }
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {base}")))?;
            base.join(endpoint)
                .map_err(|e| DomainError::InvalidUrl(format!("{e}: {endpoint}")))
        }
        Err(e) => Err(DomainError::InvalidUrl(format!("{e}: {endpoint}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_definition_gets_defaults() {
        let settings: ViewSettings = serde_json::from_value(json!({
            "title": "Users",
            "endpoint": "https://api.example.com/users"
        }))
        .expect("parse");

        assert!(settings.enable_delete);
        assert!(settings.enable_refresh);
        assert_eq!(settings.payload, PayloadMode::Array);
        assert_eq!(settings.empty_message, DEFAULT_EMPTY_MESSAGE);
        assert_eq!(settings.loading_message, DEFAULT_LOADING_MESSAGE);
        assert_eq!(settings.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(settings.notice_duration_ms, DEFAULT_NOTICE_DURATION_MS);
        assert!(settings.custom_headers.is_empty());
    }

    #[test]
    fn nested_payload_mode_parses() {
        let settings: ViewSettings = serde_json::from_value(json!({
            "title": "Orders",
            "endpoint": "orders",
            "payload": "nested",
            "enable_delete": false
        }))
        .expect("parse");

        assert_eq!(settings.payload, PayloadMode::Nested);
        assert!(!settings.enable_delete);
    }

    #[test]
    fn absolute_endpoint_ignores_base() {
        let url = resolve_endpoint("https://a.example/users", Some("https://b.example"))
            .expect("absolute");
        assert_eq!(url.as_str(), "https://a.example/users");
    }

    #[test]
    fn relative_endpoint_joins_base_as_directory() {
        let url = resolve_endpoint("users", Some("https://api.example.com/v1")).expect("joined");
        assert_eq!(url.as_str(), "https://api.example.com/v1/users");
    }

    #[test]
    fn relative_endpoint_without_base_fails() {
        assert!(matches!(
            resolve_endpoint("users", None),
            Err(DomainError::InvalidUrl(_))
        ));
        assert!(matches!(
            resolve_endpoint("  ", Some("https://x")),
            Err(DomainError::InvalidUrl(_))
        ));
    }
}
