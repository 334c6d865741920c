//! Sequential driver pairing a controller with an HTTP client.
//!
//! `TableSession` runs each network operation to completion before the
//! next one starts. It suits scripts and tests; interactive front ends
//! that need overlapping requests drive the controller from an event loop
//! instead.

use std::sync::Arc;

use rowdeck_domain::ViewSettings;

use crate::controller::{DeleteTicket, LoadTicket, TableController};
use crate::delete_record::DeleteRecord;
use crate::fetch_records::FetchRecords;
use crate::ports::HttpClient;

/// A controller together with the use cases that serve its tickets.
pub struct TableSession<C: HttpClient> {
    controller: TableController,
    fetch: FetchRecords<C>,
    delete: DeleteRecord<C>,
}

impl<C: HttpClient> TableSession<C> {
    /// Creates a session for a view.
    pub fn new(settings: ViewSettings, client: Arc<C>) -> Self {
        Self::with_controller(TableController::new(settings), client)
    }

    /// Creates a session around a configured controller.
    pub fn with_controller(controller: TableController, client: Arc<C>) -> Self {
        Self {
            controller,
            fetch: FetchRecords::new(Arc::clone(&client)),
            delete: DeleteRecord::new(client),
        }
    }

    /// Mounts the table and waits for the initial load.
    pub async fn mount(&mut self) {
        let ticket = self.controller.mount();
        self.run_load(ticket).await;
    }

    /// Reloads and waits for the result.
    pub async fn refresh(&mut self) {
        let ticket = self.controller.refresh();
        self.run_load(ticket).await;
    }

    /// Changes the endpoint and waits for the reload.
    pub async fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        let ticket = self.controller.set_endpoint(endpoint);
        self.run_load(ticket).await;
    }

    /// Confirms the pending deletion and waits for the remote call.
    pub async fn confirm_delete(&mut self) {
        if let Some(DeleteTicket { id, request }) = self.controller.confirm_delete() {
            let result = self.delete.remove(&request).await;
            self.controller.finish_delete(&id, result);
        }
    }

    async fn run_load(&mut self, ticket: Option<LoadTicket>) {
        if let Some(ticket) = ticket {
            let result = self.fetch.load(&ticket.request, ticket.payload).await;
            self.controller.finish_load(ticket.generation, result);
        }
    }

    /// Returns the controller.
    #[must_use]
    pub const fn controller(&self) -> &TableController {
        &self.controller
    }

    /// Returns the controller for synchronous actions (sort, select, ...).
    pub const fn controller_mut(&mut self) -> &mut TableController {
        &mut self.controller
    }

    /// Consumes the session and returns the controller.
    #[must_use]
    pub fn into_controller(self) -> TableController {
        self.controller
    }
}
