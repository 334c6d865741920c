//! Domain error types

use thiserror::Error;

use crate::record::RecordId;

/// Domain-level errors raised by state transitions and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or cannot carry a path.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The record has no usable `id` field.
    #[error("record has no id")]
    MissingRecordId,

    /// No record with the given id is present in the store.
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    /// No row exists at the given index.
    #[error("row index out of range: {index} (rows: {len})")]
    RowOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of rows available.
        len: usize,
    },

    /// A delete was requested while another one is pending or in flight.
    #[error("a deletion is already in progress")]
    DeletionInProgress,

    /// Delete actions are disabled for this view.
    #[error("delete is disabled for this view")]
    DeleteDisabled,

    /// The deletion state machine cannot take the requested transition.
    #[error("invalid deletion transition: {0}")]
    InvalidTransition(&'static str),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
