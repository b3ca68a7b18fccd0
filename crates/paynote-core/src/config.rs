//! Extractor configuration (vocabularies and tagging threshold)
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path (`--config`); a missing file is an error
//! 2. Override in data dir (~/.local/share/paynote/config/extractor.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Sections and keys left out of an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::vocabulary::Vocabulary;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/extractor.toml");

/// Default similarity threshold for merchant tagging
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Everything the pipeline needs besides the taxonomy and stopwords
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractorConfig {
    pub vocabulary: Vocabulary,
    /// A category is assigned only when its best score is strictly above this
    pub threshold: u8,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ExtractorConfig {
    /// Resolve and load the config (explicit → data dir → embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match resolve_path(path) {
            Some(p) => {
                let content = fs::read_to_string(&p).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", p.display(), e))
                })?;
                debug!("Loading extractor config from {}", p.display());
                parse_config(&content)
            }
            None => Self::embedded(),
        }
    }

    /// The embedded defaults
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Parse a TOML document, filling gaps from the built-in defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// `~/.local/share/paynote/config` (platform equivalent elsewhere)
pub fn data_config_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("paynote").join("config"))
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    data_config_dir().map(|d| d.join("extractor.toml"))
}

/// File that [`ExtractorConfig::load`] would read, or `None` for the embedded defaults
pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    default_config_path().filter(|p| p.exists())
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    vocabulary: Option<RawVocabulary>,
    tagging: Option<RawTagging>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVocabulary {
    debit: Option<Vec<String>>,
    credit: Option<Vec<String>>,
    non_transactional: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTagging {
    threshold: Option<i64>,
}

fn parse_config(content: &str) -> Result<ExtractorConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = ExtractorConfig::default();

    if let Some(vocab) = raw.vocabulary {
        let defaults = config.vocabulary;
        config.vocabulary = Vocabulary::new(
            vocab.debit.unwrap_or(defaults.debit),
            vocab.credit.unwrap_or(defaults.credit),
            vocab.non_transactional.unwrap_or(defaults.non_transactional),
        );
    }

    if let Some(threshold) = raw.tagging.and_then(|t| t.threshold) {
        config.threshold = u8::try_from(threshold)
            .ok()
            .filter(|t| *t <= 100)
            .ok_or_else(|| {
                Error::Config(format!(
                    "tagging.threshold must be between 0 and 100, got {}",
                    threshold
                ))
            })?;
    }

    Ok(config)
}
