//! Paynote Core Library
//!
//! Shared functionality for the Paynote transaction-message extractor:
//! - URL normalization and named extraction patterns
//! - Transactional gating and debit/credit classification
//! - Merchant and channel resolution from prepositional phrases
//! - Fuzzy merchant tagging against an ordered taxonomy
//! - Config, taxonomy and stopword loading (data dir overrides, embedded defaults)
//! - CSV / JSON batch export

pub mod amount;
pub mod channel;
pub mod config;
pub mod entities;
pub mod error;
pub mod export;
pub mod fuzzy;
pub mod merchant;
pub mod models;
pub mod normalize;
pub mod patterns;
pub mod pipeline;
pub mod stopwords;
pub mod tags;
pub mod taxonomy;
pub mod vocabulary;

pub use config::ExtractorConfig;
pub use entities::{extract_entities, Entities, Entity, Preposition};
pub use error::{Error, Result};
pub use export::{BatchRow, ExportFormat};
pub use merchant::{MerchantSource, ResolvedMerchant};
pub use models::{Direction, ExtractionResult, TransactionDetails, UNCATEGORIZED};
pub use pipeline::Extractor;
pub use stopwords::StopwordSet;
pub use tags::{MerchantTagger, TagAssignment};
pub use taxonomy::{Category, MerchantTaxonomy, TaxonomySource};
pub use vocabulary::{Gate, RejectReason, Vocabulary};
