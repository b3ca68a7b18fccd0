//! Shared utilities for commands
//!
//! This module contains:
//! - `Sources` - The `--config` / `--taxonomy` / `--stopwords` paths and how
//!   to turn them into an extractor

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use paynote_core::{Extractor, ExtractorConfig, StopwordSet, TaxonomySource};

/// Explicit input paths from the command line (`None` = default resolution)
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub config: Option<PathBuf>,
    pub taxonomy: Option<PathBuf>,
    pub stopwords: Option<PathBuf>,
}

impl Sources {
    pub fn taxonomy_source(&self) -> TaxonomySource {
        TaxonomySource::resolve(self.taxonomy.as_deref())
    }

    /// Load config, taxonomy and stopwords and build the extractor
    pub fn load_extractor(&self) -> Result<Extractor> {
        let config = ExtractorConfig::load(self.config.as_deref())
            .context("Failed to load extractor config")?;

        let source = self.taxonomy_source();
        let taxonomy = source
            .load()
            .with_context(|| format!("Failed to load taxonomy from {}", source))?;

        let stopwords =
            StopwordSet::load(self.stopwords.as_deref()).context("Failed to load stopwords")?;

        Ok(Extractor::new(config, Arc::new(taxonomy), Arc::new(stopwords)))
    }
}
