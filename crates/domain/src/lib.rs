//! Rowdeck Domain - Core record table types
//!
//! This crate defines the domain model for the Rowdeck record table.
//! All types here are pure Rust with no I/O dependencies.

pub mod column;
pub mod deletion;
pub mod error;
pub mod record;
pub mod request;
pub mod response;
pub mod settings;
pub mod sort;
pub mod value;
pub mod view;

pub use column::{CellFormat, CellFormatter, ColumnDescriptor, DetailFieldDescriptor, NOT_AVAILABLE};
pub use deletion::DeletionState;
pub use error::{DomainError, DomainResult};
pub use record::{ID_FIELD, Record, RecordId};
pub use settings::{PayloadMode, ViewSettings};
pub use sort::{SortDirection, SortState, sort_records};
pub use value::{compare_values, display_value};
pub use view::ViewState;
