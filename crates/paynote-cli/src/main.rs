//! Paynote CLI - Transaction extractor for bank SMS notifications
//!
//! Usage:
//!   paynote                        Prompt for a message and extract it
//!   paynote extract "MESSAGE"      Extract one message
//!   paynote batch --file msgs.txt  Extract one message per line to CSV/JSON
//!   paynote serve --port 3000      Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();

    let sources = commands::Sources {
        config: cli.config,
        taxonomy: cli.taxonomy,
        stopwords: cli.stopwords,
    };

    match cli.command {
        None => commands::cmd_extract(&sources, None, false),
        Some(Commands::Extract { message, json }) => {
            commands::cmd_extract(&sources, message.as_deref(), json)
        }
        Some(Commands::Batch {
            file,
            output,
            format,
        }) => commands::cmd_batch(&sources, &file, output.as_deref(), &format),
        Some(Commands::Taxonomy) => commands::cmd_taxonomy(&sources),
        Some(Commands::Config) => commands::cmd_config(&sources),
        Some(Commands::Serve {
            port,
            host,
            no_auth,
        }) => commands::cmd_serve(&sources, &host, port, no_auth).await,
    }
}
