//! UI Bridge Module
//!
//! Defines the communication protocol between a front end and the async
//! table event loop.

use rowdeck_application::{RenderedTable, TableError};
use rowdeck_domain::{DomainError, Record, RecordId};

use crate::notice::Notice;

/// Commands sent from the front end to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    /// Mount the table and start the initial load.
    Mount,

    /// Unmount the table and stop the loop.
    Unmount,

    /// User clicked refresh.
    Refresh,

    /// The endpoint prop changed.
    SetEndpoint(String),

    /// User clicked a column header.
    SortBy(String),

    /// User clicked the row at this index.
    SelectRow(usize),

    /// Open the detail view for a record.
    SelectRecord(RecordId),

    /// User clicked back in the detail view.
    Back,

    /// User clicked delete on a row.
    RequestDelete(RecordId),

    /// User clicked delete in the detail view.
    RequestDeleteSelected,

    /// User confirmed the dialog.
    ConfirmDelete,

    /// User closed the dialog.
    CancelDelete,

    /// User pressed Escape.
    Escape,
}

/// Everything a front end draws at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The table render model.
    pub table: RenderedTable,
    /// Visible notices, oldest first.
    pub notices: Vec<Notice>,
}

/// Updates sent from the event loop to the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum TableUpdate {
    /// Redraw with this frame.
    Render(Frame),

    /// The record collection changed after a load or delete.
    DataChanged(Vec<Record>),

    /// A load or delete failed.
    Error(TableError),

    /// A command was refused; nothing changed.
    Rejected(DomainError),

    /// The loop has stopped.
    Closed,
}
