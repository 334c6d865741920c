//! Table controller.
//!
//! `TableController` owns all state of one record table: the data store,
//! sort state, list/detail view, and the delete confirmation flow. It does
//! no I/O. Operations that need the network hand out a ticket describing
//! the request; whoever runs the request reports the outcome back with
//! `finish_load` or `finish_delete`.
//!
//! Loads are tagged with a generation number. Only the outcome of the most
//! recent load is applied, so a slow response to an old endpoint can never
//! overwrite a newer one. After `unmount` every outcome is ignored.
//!
//! A deletion remembers the endpoint it was issued against. If the table
//! has moved to another endpoint by the time it settles, the current list
//! is left alone.

use rowdeck_domain::{
    ColumnDescriptor, DeletionState, DetailFieldDescriptor, DomainError, DomainResult,
    PayloadMode, Record, RecordId, SortState, ViewSettings, ViewState, request::RequestSpec,
};
use tracing::{debug, info, warn};

use crate::delete_record::delete_request;
use crate::error::{DeleteError, FetchError, TableError};
use crate::fetch_records::list_request;
use crate::observer::TableObserver;
use crate::screen::{
    ConfirmationDialog, DetailLine, DetailScreen, HeaderCell, ListBody, ListScreen,
    RenderedTable, Row, Screen,
};
use crate::store::DataStore;

/// A list request to run on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    /// Generation to report back with the outcome.
    pub generation: u64,
    /// The request to execute.
    pub request: RequestSpec,
    /// How to read the response body.
    pub payload: PayloadMode,
}

/// A delete request to run on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    /// Record being deleted.
    pub id: RecordId,
    /// The request to execute.
    pub request: RequestSpec,
}

/// State machine behind one record table.
pub struct TableController {
    settings: ViewSettings,
    store: DataStore,
    sort: SortState,
    view: ViewState,
    deletion: DeletionState,
    delete_endpoint: Option<String>,
    generation: u64,
    mounted: bool,
    observer: Option<Box<dyn TableObserver>>,
}

impl TableController {
    /// Creates an unmounted controller for a view.
    #[must_use]
    pub fn new(settings: ViewSettings) -> Self {
        Self {
            settings,
            store: DataStore::new(),
            sort: SortState::default(),
            view: ViewState::List,
            deletion: DeletionState::Idle,
            delete_endpoint: None,
            generation: 0,
            mounted: false,
            observer: None,
        }
    }

    /// Replaces the list columns, for example to attach custom formatters.
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.settings.columns = columns;
        self
    }

    /// Replaces the detail fields.
    #[must_use]
    pub fn with_detail_fields(mut self, fields: Vec<DetailFieldDescriptor>) -> Self {
        self.settings.detail_fields = fields;
        self
    }

    /// Installs an observer for data changes and errors.
    #[must_use]
    pub fn with_observer(mut self, observer: impl TableObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Mounts the table and starts the initial load.
    pub fn mount(&mut self) -> Option<LoadTicket> {
        self.mounted = true;
        info!(event = "table.mounted", title = %self.settings.title);
        self.begin_load()
    }

    /// Unmounts the table. Outcomes arriving afterwards are ignored.
    pub fn unmount(&mut self) {
        if self.mounted {
            info!(event = "table.unmounted", title = %self.settings.title);
        }
        self.mounted = false;
    }

    /// Returns true between `mount` and `unmount`.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Reloads the list on user request.
    ///
    /// Returns `None` when refresh is disabled for this view.
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        if !self.settings.enable_refresh {
            debug!(event = "table.refresh_disabled");
            return None;
        }
        self.begin_load()
    }

    /// Points the table at a new endpoint and reloads if it changed.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> Option<LoadTicket> {
        let endpoint = endpoint.into();
        if endpoint == self.settings.endpoint {
            return None;
        }
        info!(event = "table.endpoint_changed", endpoint = %endpoint);
        self.settings.endpoint = endpoint;
        self.begin_load()
    }

    /// Starts a load and returns the request to run.
    ///
    /// Any load still in flight becomes stale. If the endpoint cannot be
    /// resolved the load fails immediately and `None` is returned.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if !self.mounted {
            debug!(event = "table.load_skipped_unmounted");
            return None;
        }

        self.generation += 1;
        let generation = self.generation;

        match self.settings.resolve_endpoint() {
            Ok(endpoint) => {
                self.store.set_loading(true);
                debug!(event = "table.load_started", generation, url = %endpoint);
                Some(LoadTicket {
                    generation,
                    request: list_request(
                        endpoint,
                        &self.settings.custom_headers,
                        self.settings.timeout_ms,
                    ),
                    payload: self.settings.payload,
                })
            }
            Err(e) => {
                self.finish_load(generation, Err(FetchError::InvalidEndpoint(e)));
                None
            }
        }
    }

    /// Applies the outcome of a load.
    ///
    /// Returns false if the outcome was ignored because a newer load has
    /// started or the table is unmounted.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<Vec<Record>, FetchError>,
    ) -> bool {
        if !self.mounted {
            debug!(event = "table.load_ignored_unmounted", generation);
            return false;
        }
        if generation != self.generation {
            debug!(
                event = "table.load_stale",
                generation,
                latest = self.generation
            );
            return false;
        }

        self.store.set_loading(false);
        match result {
            Ok(records) => {
                info!(event = "table.load_completed", count = records.len());
                self.store.replace(records);
                self.sort = SortState::default();
                self.notify_data_change();
            }
            Err(e) => {
                warn!(event = "table.load_failed", error = %e);
                self.store.clear();
                self.notify_error(&TableError::Fetch(e));
            }
        }
        true
    }

    /// Sorts by a column header click.
    ///
    /// Returns false, changing nothing, for unknown or non-sortable columns.
    pub fn sort_by(&mut self, key: &str) -> bool {
        let sortable = self
            .settings
            .columns
            .iter()
            .any(|column| column.key == key && column.sortable);
        if !sortable {
            debug!(event = "table.sort_ignored", key);
            return false;
        }

        self.sort = self.sort.select(key);
        self.store.sort(key, self.sort.direction);
        debug!(event = "table.sorted", key, direction = %self.sort.direction);
        true
    }

    /// Opens the detail view for the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns `RowOutOfRange` if there is no such row.
    pub fn select_row(&mut self, index: usize) -> DomainResult<()> {
        let record = self.store.get(index).ok_or(DomainError::RowOutOfRange {
            index,
            len: self.store.len(),
        })?;
        self.view = ViewState::Detail(record.clone());
        Ok(())
    }

    /// Opens the detail view for the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record has that id.
    pub fn select_record(&mut self, id: &RecordId) -> DomainResult<()> {
        let record = self
            .store
            .find(id)
            .ok_or_else(|| DomainError::RecordNotFound(id.clone()))?;
        self.view = ViewState::Detail(record.clone());
        Ok(())
    }

    /// Returns to the list view.
    pub fn back(&mut self) {
        self.view = ViewState::List;
    }

    /// Asks for confirmation to delete the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `DeleteDisabled`, `RecordNotFound`, or `DeletionInProgress`.
    pub fn request_delete(&mut self, id: RecordId) -> DomainResult<()> {
        if !self.settings.enable_delete {
            return Err(DomainError::DeleteDisabled);
        }
        if self.store.find(&id).is_none() {
            return Err(DomainError::RecordNotFound(id));
        }
        self.deletion.request(id)
    }

    /// Asks for confirmation to delete the record in the detail view.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside the detail view,
    /// `MissingRecordId` if the record has no id, or any error of
    /// `request_delete`.
    pub fn request_delete_selected(&mut self) -> DomainResult<()> {
        let record = self
            .view
            .detail_record()
            .ok_or(DomainError::InvalidTransition("no record selected"))?;
        let id = record.id().ok_or(DomainError::MissingRecordId)?;
        self.request_delete(id)
    }

    /// Closes the confirmation dialog without deleting.
    pub fn cancel_delete(&mut self) -> bool {
        self.deletion.cancel()
    }

    /// Confirms the pending deletion and returns the request to run.
    ///
    /// Returns `None` if nothing awaits confirmation. If the record URL
    /// cannot be built the deletion fails immediately and `None` is
    /// returned.
    pub fn confirm_delete(&mut self) -> Option<DeleteTicket> {
        let id = self.deletion.confirm().ok()?;

        let request = self
            .settings
            .resolve_endpoint()
            .map_err(DeleteError::from)
            .and_then(|endpoint| {
                delete_request(
                    &endpoint,
                    &id,
                    &self.settings.custom_headers,
                    self.settings.timeout_ms,
                )
            });

        match request {
            Ok(request) => {
                debug!(event = "table.delete_started", id = %id, url = %request.url);
                self.delete_endpoint = Some(self.settings.endpoint.clone());
                Some(DeleteTicket { id, request })
            }
            Err(e) => {
                self.finish_delete(&id, Err(e));
                None
            }
        }
    }

    /// Applies the outcome of a deletion.
    ///
    /// Returns false if the outcome was ignored because the table is
    /// unmounted or `id` is not the deletion in flight. A successful
    /// deletion issued against another endpoint settles without touching
    /// the current list.
    pub fn finish_delete(&mut self, id: &RecordId, result: Result<(), DeleteError>) -> bool {
        if !self.mounted {
            debug!(event = "table.delete_ignored_unmounted", id = %id);
            return false;
        }
        if !matches!(&self.deletion, DeletionState::Deleting(target) if target == id) {
            debug!(event = "table.delete_unexpected", id = %id);
            return false;
        }

        self.deletion.settle();
        let issued_against = self.delete_endpoint.take();
        match result {
            Ok(()) if issued_against.as_deref().is_some_and(|e| e != self.settings.endpoint) => {
                info!(
                    event = "table.delete_completed_elsewhere",
                    id = %id,
                    endpoint = %self.settings.endpoint
                );
            }
            Ok(()) => {
                let removed = self.store.remove(id);
                info!(event = "table.delete_completed", id = %id, removed);
                if self.view.detail_record().is_some_and(|r| r.has_id(id)) {
                    self.view = ViewState::List;
                }
                self.notify_data_change();
            }
            Err(e) => {
                warn!(event = "table.delete_failed", id = %id, error = %e);
                self.notify_error(&TableError::Delete {
                    id: id.clone(),
                    source: e,
                });
            }
        }
        true
    }

    /// Builds the render model for the current state.
    #[must_use]
    pub fn render(&self) -> RenderedTable {
        let screen = match &self.view {
            ViewState::List => Screen::List(self.list_screen()),
            ViewState::Detail(record) => Screen::Detail(self.detail_screen(record)),
        };
        RenderedTable {
            screen,
            confirmation: ConfirmationDialog {
                is_open: self.deletion.is_confirm_pending(),
                target: self
                    .deletion
                    .is_confirm_pending()
                    .then(|| self.deletion.target().cloned())
                    .flatten(),
            },
        }
    }

    fn list_screen(&self) -> ListScreen {
        let columns = &self.settings.columns;
        let body = if self.store.is_loading() {
            ListBody::Loading(self.settings.loading_message.clone())
        } else if self.store.is_empty() {
            ListBody::Empty(self.settings.empty_message.clone())
        } else {
            ListBody::Rows(
                self.store
                    .records()
                    .iter()
                    .map(|record| Row {
                        id: record.id(),
                        cells: columns.iter().map(|column| column.render(record)).collect(),
                    })
                    .collect(),
            )
        };

        ListScreen {
            title: self.settings.title.clone(),
            headers: columns
                .iter()
                .map(|column| HeaderCell {
                    key: column.key.clone(),
                    label: column.header.clone(),
                    sortable: column.sortable,
                    sorted: self.sort.direction_for(&column.key),
                })
                .collect(),
            body,
            show_refresh: self.settings.enable_refresh,
            show_delete: self.settings.enable_delete,
            extra_actions: self.settings.extra_actions.clone(),
        }
    }

    fn detail_screen(&self, record: &Record) -> DetailScreen {
        DetailScreen {
            title: self.settings.detail_title.clone(),
            id: record.id(),
            fields: self
                .settings
                .detail_fields
                .iter()
                .map(|field| DetailLine {
                    label: field.label.clone(),
                    value: field.render(record),
                })
                .collect(),
            show_delete: self.settings.enable_delete,
        }
    }

    fn notify_data_change(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_data_change(self.store.records());
        }
    }

    fn notify_error(&mut self, error: &TableError) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_error(error);
        }
    }

    /// Returns the records in display order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    /// Returns true while the latest load is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    /// Returns the sort state.
    #[must_use]
    pub const fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Returns the view state.
    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Returns the deletion state.
    #[must_use]
    pub const fn deletion(&self) -> &DeletionState {
        &self.deletion
    }

    /// Returns the view settings.
    #[must_use]
    pub const fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Returns the generation of the most recent load.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl std::fmt::Debug for TableController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableController")
            .field("title", &self.settings.title)
            .field("records", &self.store.len())
            .field("loading", &self.store.is_loading())
            .field("sort", &self.sort)
            .field("deletion", &self.deletion)
            .field("generation", &self.generation)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
