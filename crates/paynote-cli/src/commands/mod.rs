//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (`Sources`: resolving and loading inputs)
//! - `extract` - One-shot and interactive extraction
//! - `batch` - File-based extraction with CSV/JSON output
//! - `taxonomy` - Taxonomy listing
//! - `config` - Resolved config sources
//! - `serve` - Web server command

pub mod batch;
pub mod config;
pub mod core;
pub mod extract;
pub mod serve;
pub mod taxonomy;

// Re-export command functions for main.rs
pub use batch::*;
pub use config::*;
pub use core::*;
pub use extract::*;
pub use serve::*;
pub use taxonomy::*;
