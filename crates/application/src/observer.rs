//! Observer callbacks for table state changes.

use std::fmt;

use rowdeck_domain::Record;

use crate::error::TableError;

/// Receives notifications from a `TableController`.
///
/// Both methods default to doing nothing, so implementors only override
/// what they care about.
pub trait TableObserver: Send {
    /// Called with the full collection after a successful load or delete.
    fn on_data_change(&mut self, _records: &[Record]) {}

    /// Called when a load or delete fails.
    fn on_error(&mut self, _error: &TableError) {}
}

type DataChangeFn = Box<dyn FnMut(&[Record]) + Send>;
type ErrorFn = Box<dyn FnMut(&TableError) + Send>;

/// Observer built from optional closures.
#[derive(Default)]
pub struct CallbackObserver {
    on_data_change: Option<DataChangeFn>,
    on_error: Option<ErrorFn>,
}

impl CallbackObserver {
    /// Creates an observer with no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data-change callback.
    #[must_use]
    pub fn on_data_change(mut self, callback: impl FnMut(&[Record]) + Send + 'static) -> Self {
        self.on_data_change = Some(Box::new(callback));
        self
    }

    /// Sets the error callback.
    #[must_use]
    pub fn on_error(mut self, callback: impl FnMut(&TableError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for CallbackObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackObserver")
            .field("on_data_change", &self.on_data_change.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl TableObserver for CallbackObserver {
    fn on_data_change(&mut self, records: &[Record]) {
        if let Some(callback) = self.on_data_change.as_mut() {
            callback(records);
        }
    }

    fn on_error(&mut self, error: &TableError) {
        if let Some(callback) = self.on_error.as_mut() {
            callback(error);
        }
    }
}
