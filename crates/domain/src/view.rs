//! List/detail presentation mode.

use crate::record::Record;

/// Which presentation the table is in.
///
/// `Detail` owns a copy of the selected record; going back to `List`
/// drops it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// All records as rows.
    #[default]
    List,
    /// A single record's fields.
    Detail(Record),
}

impl ViewState {
    /// Returns true in list mode.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List)
    }

    /// Returns the record shown in detail mode.
    #[must_use]
    pub const fn detail_record(&self) -> Option<&Record> {
        match self {
            Self::Detail(record) => Some(record),
            Self::List => None,
        }
    }
}
