//! Rowdeck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus view definition files.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use persistence::{ViewRepository, ViewRepositoryError};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable};
