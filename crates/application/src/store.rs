//! In-memory record store.

use rowdeck_domain::{Record, RecordId, SortDirection, sort_records};

/// The records currently shown by a table, plus its loading flag.
///
/// Every successful load replaces the whole collection; records are never
/// merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataStore {
    records: Vec<Record>,
    loading: bool,
}

impl DataStore {
    /// Creates an empty, idle store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            loading: false,
        }
    }

    /// Replaces the collection.
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Empties the collection.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Removes every record with the given id and returns how many went.
    pub fn remove(&mut self, id: &RecordId) -> usize {
        let before = self.records.len();
        self.records.retain(|record| !record.has_id(id));
        before - self.records.len()
    }

    /// Orders the collection by `key`.
    pub fn sort(&mut self, key: &str, direction: SortDirection) {
        sort_records(&mut self.records, key, direction);
    }

    /// Returns the record at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Returns the first record with the given id.
    #[must_use]
    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.has_id(id))
    }

    /// Returns all records in display order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sets the loading flag.
    pub const fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Returns true while a load is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }
}
