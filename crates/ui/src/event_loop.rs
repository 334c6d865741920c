//! Async table event loop.
//!
//! The loop owns a `TableController` and serves it from a command channel.
//! Network requests run as spawned tasks; their outcomes come back over an
//! internal channel and are applied in order with everything else, so the
//! controller is only ever touched from the loop.

use std::sync::Arc;

use rowdeck_application::{
    Clock, DeleteError, DeleteRecord, DeleteTicket, FetchError, FetchRecords, HttpClient,
    LoadTicket, TableController, TableError, TableObserver,
};
use rowdeck_domain::{DomainResult, Record, RecordId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bridge::{Frame, TableCommand, TableUpdate};
use crate::notice::{NoticeBoard, NoticeKind};

/// Forwards controller notifications to the update channel.
struct ChannelObserver {
    update_tx: mpsc::UnboundedSender<TableUpdate>,
}

impl TableObserver for ChannelObserver {
    fn on_data_change(&mut self, records: &[Record]) {
        let _ = self.update_tx.send(TableUpdate::DataChanged(records.to_vec()));
    }

    fn on_error(&mut self, error: &TableError) {
        let _ = self.update_tx.send(TableUpdate::Error(error.clone()));
    }
}

enum Completion {
    Load {
        generation: u64,
        result: Result<Vec<Record>, FetchError>,
    },
    Delete {
        id: RecordId,
        result: Result<(), DeleteError>,
    },
}

/// Channels and task of a spawned event loop.
#[derive(Debug)]
pub struct TableHandle {
    /// Send commands here.
    pub commands: mpsc::UnboundedSender<TableCommand>,
    /// Receive frames and notifications here.
    pub updates: mpsc::UnboundedReceiver<TableUpdate>,
    /// The loop task.
    pub task: JoinHandle<()>,
}

/// Event loop serving one table.
pub struct TableEventLoop<C: HttpClient + 'static, K: Clock> {
    controller: TableController,
    fetch: Arc<FetchRecords<C>>,
    delete: Arc<DeleteRecord<C>>,
    clock: K,
    notices: NoticeBoard,
    update_tx: mpsc::UnboundedSender<TableUpdate>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<C: HttpClient + 'static, K: Clock + 'static> TableEventLoop<C, K> {
    /// Creates a loop around `controller`.
    ///
    /// The controller's observer is replaced by one that forwards to
    /// `update_tx`.
    pub fn new(
        controller: TableController,
        client: Arc<C>,
        clock: K,
        update_tx: mpsc::UnboundedSender<TableUpdate>,
    ) -> Self {
        let notices = NoticeBoard::new(controller.settings().notice_duration_ms);
        let controller = controller.with_observer(ChannelObserver {
            update_tx: update_tx.clone(),
        });
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            controller,
            fetch: Arc::new(FetchRecords::new(Arc::clone(&client))),
            delete: Arc::new(DeleteRecord::new(client)),
            clock,
            notices,
            update_tx,
            completion_tx,
            completion_rx,
        }
    }

    /// Spawns a loop on the current runtime and returns its channels.
    ///
    /// The table is not mounted until `TableCommand::Mount` is sent.
    pub fn spawn(controller: TableController, client: Arc<C>, clock: K) -> TableHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let event_loop = Self::new(controller, client, clock, update_tx);
        let task = tokio::spawn(event_loop.run(command_rx));

        TableHandle {
            commands: command_tx,
            updates: update_rx,
            task,
        }
    }

    /// Serves commands until `Unmount` arrives or the command channel
    /// closes.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<TableCommand>) {
        info!(event = "ui.loop_started", title = %self.controller.settings().title);

        loop {
            let notice_timer = self.notices.until_next_expiry(self.clock.now());
            let notice_expiry = tokio::time::sleep(notice_timer.unwrap_or_default());

            tokio::select! {
                command = commands.recv() => match command {
                    Some(TableCommand::Unmount) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(completion) = self.completion_rx.recv() => {
                    self.handle_completion(completion);
                }
                () = notice_expiry, if notice_timer.is_some() => {
                    if self.notices.prune(self.clock.now()) {
                        self.publish();
                    }
                }
            }
        }

        self.controller.unmount();
        let _ = self.update_tx.send(TableUpdate::Closed);
        info!(event = "ui.loop_stopped");
    }

    fn handle_command(&mut self, command: TableCommand) {
        debug!(event = "ui.command", command = ?command);
        match command {
            TableCommand::Mount => {
                let ticket = self.controller.mount();
                self.spawn_load(ticket);
            }
            TableCommand::Refresh => {
                let ticket = self.controller.refresh();
                self.spawn_load(ticket);
            }
            TableCommand::SetEndpoint(endpoint) => {
                let ticket = self.controller.set_endpoint(endpoint);
                self.spawn_load(ticket);
            }
            TableCommand::SortBy(key) => {
                self.controller.sort_by(&key);
            }
            TableCommand::SelectRow(index) => {
                let result = self.controller.select_row(index);
                self.check(result);
            }
            TableCommand::SelectRecord(id) => {
                let result = self.controller.select_record(&id);
                self.check(result);
            }
            TableCommand::Back => self.controller.back(),
            TableCommand::RequestDelete(id) => {
                let result = self.controller.request_delete(id);
                self.check(result);
            }
            TableCommand::RequestDeleteSelected => {
                let result = self.controller.request_delete_selected();
                self.check(result);
            }
            TableCommand::ConfirmDelete => {
                let ticket = self.controller.confirm_delete();
                self.spawn_delete(ticket);
            }
            TableCommand::CancelDelete | TableCommand::Escape => {
                self.controller.cancel_delete();
            }
            TableCommand::Unmount => return,
        }
        self.publish();
    }

    fn handle_completion(&mut self, completion: Completion) {
        let now = self.clock.now();
        match completion {
            Completion::Load { generation, result } => {
                let failure = result
                    .as_ref()
                    .err()
                    .map(|e| TableError::Fetch(e.clone()).to_string());
                if !self.controller.finish_load(generation, result) {
                    return;
                }
                if let Some(message) = failure {
                    self.notices.post(NoticeKind::Error, message, now);
                }
            }
            Completion::Delete { id, result } => {
                let (kind, message) = match &result {
                    Ok(()) => (NoticeKind::Success, format!("Record {id} deleted")),
                    Err(e) => (
                        NoticeKind::Error,
                        TableError::Delete {
                            id: id.clone(),
                            source: e.clone(),
                        }
                        .to_string(),
                    ),
                };
                if !self.controller.finish_delete(&id, result) {
                    return;
                }
                self.notices.post(kind, message, now);
            }
        }
        self.publish();
    }

    fn check(&self, result: DomainResult<()>) {
        if let Err(e) = result {
            warn!(event = "ui.command_rejected", error = %e);
            let _ = self.update_tx.send(TableUpdate::Rejected(e));
        }
    }

    fn spawn_load(&self, ticket: Option<LoadTicket>) {
        let Some(LoadTicket {
            generation,
            request,
            payload,
        }) = ticket
        else {
            return;
        };
        let fetch = Arc::clone(&self.fetch);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = fetch.load(&request, payload).await;
            let _ = completion_tx.send(Completion::Load { generation, result });
        });
    }

    fn spawn_delete(&self, ticket: Option<DeleteTicket>) {
        let Some(DeleteTicket { id, request }) = ticket else {
            return;
        };
        let delete = Arc::clone(&self.delete);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = delete.remove(&request).await;
            let _ = completion_tx.send(Completion::Delete { id, result });
        });
    }

    fn publish(&self) {
        let frame = Frame {
            table: self.controller.render(),
            notices: self.notices.active(self.clock.now()),
        };
        let _ = self.update_tx.send(TableUpdate::Render(frame));
    }
}
