//! Render model.
//!
//! A `RenderedTable` is everything a front end needs to draw the table at
//! one instant: the list or detail screen with cells already formatted,
//! and the state of the delete confirmation dialog. Front ends draw it
//! and send user actions back to the controller.

use rowdeck_domain::{RecordId, SortDirection};

/// Snapshot of the table for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    /// The active screen.
    pub screen: Screen,
    /// The delete confirmation dialog.
    pub confirmation: ConfirmationDialog,
}

/// List or detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Table of all records.
    List(ListScreen),
    /// One record's fields.
    Detail(DetailScreen),
}

/// The list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListScreen {
    /// View title.
    pub title: String,
    /// Column headers in display order.
    pub headers: Vec<HeaderCell>,
    /// Loading message, empty message, or rows.
    pub body: ListBody,
    /// Whether to offer the refresh action.
    pub show_refresh: bool,
    /// Whether rows offer a delete action.
    pub show_delete: bool,
    /// Extra action labels shown next to refresh.
    pub extra_actions: Vec<String>,
}

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column key; send it back to sort.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether clicking sorts.
    pub sortable: bool,
    /// Direction if the list is sorted by this column.
    pub sorted: Option<SortDirection>,
}

impl HeaderCell {
    /// Header text with the sort arrow appended when sorted.
    #[must_use]
    pub fn display(&self) -> String {
        match self.sorted {
            Some(direction) if self.sortable => format!("{} {}", self.label, direction.indicator()),
            _ => self.label.clone(),
        }
    }
}

/// What the list body shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    /// A fetch is outstanding.
    Loading(String),
    /// The settled list is empty.
    Empty(String),
    /// Formatted rows.
    Rows(Vec<Row>),
}

/// One formatted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Record id, used for row actions.
    pub id: Option<RecordId>,
    /// Cells in column order.
    pub cells: Vec<String>,
}

/// The detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailScreen {
    /// Detail title.
    pub title: String,
    /// Id of the shown record.
    pub id: Option<RecordId>,
    /// Labelled values.
    pub fields: Vec<DetailLine>,
    /// Whether to offer the delete action.
    pub show_delete: bool,
}

/// One labelled value of the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    /// Field label.
    pub label: String,
    /// Formatted value.
    pub value: String,
}

/// Props for the confirmation collaborator.
///
/// Its close action maps to `TableController::cancel_delete` and its
/// confirm action to `TableController::confirm_delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationDialog {
    /// Whether the dialog is shown.
    pub is_open: bool,
    /// Record awaiting confirmation.
    pub target: Option<RecordId>,
}
