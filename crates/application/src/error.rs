//! Application error types

use rowdeck_domain::{DomainError, RecordId, response::StatusCode};
use thiserror::Error;

use crate::ports::HttpClientError;

/// Failure to load the record list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint could not be turned into a request URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] DomainError),

    /// The request never produced a response.
    #[error("{0}")]
    Transport(#[from] HttpClientError),

    /// The server answered with a non-success status.
    #[error("server responded with {0}")]
    Status(StatusCode),

    /// The response body was not valid JSON.
    #[error("could not decode response body: {0}")]
    Decode(String),
}

/// Failure to remove a record remotely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteError {
    /// The record URL could not be built.
    #[error("invalid record URL: {0}")]
    InvalidUrl(#[from] DomainError),

    /// The request never produced a response.
    #[error("{0}")]
    Transport(#[from] HttpClientError),

    /// The server answered with a non-success status.
    #[error("server responded with {0}")]
    Status(StatusCode),
}

/// Error reported to a table's error observer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Loading the list failed; the list is now empty.
    #[error("failed to load records: {0}")]
    Fetch(#[from] FetchError),

    /// Deleting a record failed; the list is unchanged.
    #[error("failed to delete record {id}: {source}")]
    Delete {
        /// Record that was not deleted.
        id: RecordId,
        /// Why.
        source: DeleteError,
    },
}
