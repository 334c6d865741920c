//! Rowdeck - Main Entry Point
//!
//! Shows REST collections as sortable tables with a detail view and
//! confirmed deletes, driven from the terminal.

mod cli;
mod commands;
mod input;

use clap::Parser;
use rowdeck_infrastructure::ViewRepository;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the table.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let repository = ViewRepository::new();

    match cli.command {
        Commands::Show {
            view,
            endpoint,
            headers,
            once,
        } => {
            let settings = commands::load_view(&repository, &view, endpoint, headers).await?;
            if once {
                commands::show_once(settings).await
            } else {
                commands::show_interactive(settings).await
            }
        }
        Commands::Stats { views } => commands::stats(&repository, &views).await,
    }
}
