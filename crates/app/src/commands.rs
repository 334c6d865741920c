//! Subcommand implementations.

use std::error::Error;
use std::sync::Arc;

use rowdeck_application::{CallbackObserver, TableController, TableSession};
use rowdeck_domain::ViewSettings;
use rowdeck_infrastructure::{ReqwestHttpClient, SystemClock, ViewRepository};
use rowdeck_ui::{Frame, TableCommand, TableEventLoop, TableUpdate, render_frame, render_table};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::input::{HELP, Input, parse_input, to_command};

type CommandResult = Result<(), Box<dyn Error>>;

/// Loads a view and applies command-line overrides.
pub async fn load_view(
    repository: &ViewRepository,
    reference: &str,
    endpoint: Option<String>,
    headers: Vec<(String, String)>,
) -> Result<ViewSettings, Box<dyn Error>> {
    let mut settings = repository.load(reference).await?;
    if let Some(endpoint) = endpoint {
        settings.endpoint = endpoint;
    }
    settings.custom_headers.extend(headers);
    Ok(settings)
}

/// Loads the view once, prints it, and exits.
pub async fn show_once(settings: ViewSettings) -> CommandResult {
    let client = Arc::new(ReqwestHttpClient::new()?);
    let controller = TableController::new(settings).with_observer(
        CallbackObserver::new().on_error(|error| eprintln!("error: {error}")),
    );
    let mut session = TableSession::with_controller(controller, client);

    session.mount().await;
    print!("{}", render_table(&session.controller().render()));
    Ok(())
}

/// Shows the view and serves commands typed on stdin until `quit` or EOF.
pub async fn show_interactive(settings: ViewSettings) -> CommandResult {
    let client = Arc::new(ReqwestHttpClient::new()?);
    let mut handle =
        TableEventLoop::spawn(TableController::new(settings), client, SystemClock::new());
    let _ = handle.commands.send(TableCommand::Mount);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut last_frame: Option<Frame> = None;

    loop {
        tokio::select! {
            update = handle.updates.recv() => match update {
                Some(TableUpdate::Render(frame)) => {
                    println!("{}", render_frame(&frame));
                    last_frame = Some(frame);
                }
                Some(TableUpdate::Rejected(error)) => eprintln!("{error}"),
                Some(TableUpdate::DataChanged(_) | TableUpdate::Error(_)) => {}
                Some(TableUpdate::Closed) | None => break,
            },
            line = lines.next_line(), if stdin_open => match line? {
                None => {
                    stdin_open = false;
                    let _ = handle.commands.send(TableCommand::Unmount);
                }
                Some(line) => match parse_input(&line) {
                    Ok(Input::Quit) => {
                        let _ = handle.commands.send(TableCommand::Unmount);
                    }
                    Ok(Input::Help) => println!("{HELP}"),
                    Ok(input) => {
                        if let Some(command) = to_command(input, last_frame.as_ref()) {
                            let _ = handle.commands.send(command);
                        }
                    }
                    Err(error) => eprintln!("{error}"),
                },
            },
        }
    }

    handle.task.await?;
    Ok(())
}

/// Prints `title: count` for each view. A failed fetch counts as 0.
pub async fn stats(repository: &ViewRepository, views: &[String]) -> CommandResult {
    let client = Arc::new(ReqwestHttpClient::new()?);

    for reference in views {
        let settings = repository.load(reference).await?;
        let title = settings.title.clone();
        let controller = TableController::new(settings).with_observer(
            CallbackObserver::new().on_error(|error| {
                warn!(event = "stats.fetch_failed", error = %error);
            }),
        );
        let mut session = TableSession::with_controller(controller, Arc::clone(&client));
        session.mount().await;

        let count = session.controller().records().len();
        info!(event = "stats.counted", view = %reference, count);
        println!("{}", stat_line(&title, count));
    }
    Ok(())
}

fn stat_line(title: &str, count: usize) -> String {
    format!("{title}: {count}")
}
