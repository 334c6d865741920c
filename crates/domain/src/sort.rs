//! Sort state and record ordering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::compare_values;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Arrow shown next to a sorted column header.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

/// Which column the list is sorted by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Column key, or `None` while the list is in server order.
    pub key: Option<String>,
    /// Current direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Returns the state after the user selects `key`.
    ///
    /// Reselecting the current key toggles the direction; any other key
    /// starts ascending.
    #[must_use]
    pub fn select(&self, key: &str) -> Self {
        let direction = if self.key.as_deref() == Some(key) {
            self.direction.toggled()
        } else {
            SortDirection::Ascending
        };
        Self {
            key: Some(key.to_string()),
            direction,
        }
    }

    /// Returns the direction if the list is sorted by `key`.
    #[must_use]
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.key.as_deref() == Some(key)).then_some(self.direction)
    }
}

/// Orders records in place by the value of `key`.
pub fn sort_records(records: &mut [Record], key: &str, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = compare_values(a.field(key), b.field(key));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
