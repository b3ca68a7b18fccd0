//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Paynote - Pull transaction details out of bank SMS messages
#[derive(Parser)]
#[command(name = "paynote")]
#[command(about = "Transaction extractor for bank SMS notifications", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Extractor config (TOML); defaults to the data dir override, then built-in
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Merchant taxonomy (JSON object of category -> merchant names)
    #[arg(long, global = true)]
    pub taxonomy: Option<PathBuf>,

    /// Stopword list (one word per line)
    #[arg(long, global = true)]
    pub stopwords: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to an interactive `extract`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract transaction details from one message
    Extract {
        /// Message text (prompted for on the console when omitted)
        message: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract from a file with one message per line
    Batch {
        /// Input file (blank lines are skipped)
        #[arg(short, long)]
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// List taxonomy categories and merchant counts
    Taxonomy,

    /// Show where config, taxonomy and stopwords are loaded from
    Config,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, requests need "Authorization: Bearer <key>" with a key
        /// from PAYNOTE_API_KEYS.
        #[arg(long)]
        no_auth: bool,
    },
}
