//! Command-line arguments.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rowdeck")]
#[command(about = "Browse and manage REST collections as tables", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one view and read commands from stdin.
    Show {
        /// View name or path to a view definition file.
        view: String,

        /// Override the view's endpoint.
        #[arg(long)]
        endpoint: Option<String>,

        /// Extra request header, as NAME=VALUE. Repeatable.
        #[arg(long = "header", value_name = "NAME=VALUE", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        /// Print the loaded list once and exit.
        #[arg(long)]
        once: bool,
    },

    /// Print the record count of each view.
    Stats {
        /// View names or paths.
        #[arg(required = true)]
        views: Vec<String>,
    },
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
