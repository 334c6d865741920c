//! Rowdeck Application - Table controller, use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - Fetch and delete use cases
//! - The table controller state machine and its render model
//! - Application-level error handling

pub mod controller;
pub mod delete_record;
pub mod error;
pub mod fetch_records;
pub mod observer;
pub mod ports;
pub mod screen;
pub mod session;
pub mod store;

pub use controller::{DeleteTicket, LoadTicket, TableController};
pub use delete_record::{DeleteRecord, delete_request};
pub use error::{DeleteError, FetchError, TableError};
pub use fetch_records::{FetchRecords, JSON_CONTENT_TYPE, list_request, normalize_payload};
pub use observer::{CallbackObserver, TableObserver};
pub use ports::{Clock, HttpClient, HttpClientError};
pub use screen::{
    ConfirmationDialog, DetailLine, DetailScreen, HeaderCell, ListBody, ListScreen, RenderedTable,
    Row, Screen,
};
pub use session::TableSession;
pub use store::DataStore;
