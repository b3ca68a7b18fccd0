//! Merchant taxonomy: ordered categories of known merchant names
//!
//! Category order matters (tagging takes the first category that
//! qualifies), so the JSON object is read with a visitor that keeps
//! document order instead of going through a hash map.
//!
//! ## Source Resolution
//!
//! 1. Explicit path (`--taxonomy`)
//! 2. Override in data dir (~/.local/share/paynote/config/merchants.json)
//! 3. Embedded sample taxonomy (compiled into binary)

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::config::data_config_dir;
use crate::error::Result;

/// Embedded sample taxonomy
const DEFAULT_TAXONOMY: &str = include_str!("../../../config/merchants.json");

/// One category and its merchant names, in file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub merchants: Vec<String>,
}

/// Ordered category → merchant names mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerchantTaxonomy {
    categories: Vec<Category>,
}

impl MerchantTaxonomy {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// No categories: every message tags as uncategorized
    pub fn empty() -> Self {
        Self::default()
    }

    /// The sample taxonomy shipped with the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(DEFAULT_TAXONOMY)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let taxonomy = Self::from_json(&content)?;
        info!(
            "Loaded taxonomy from {} ({} categories, {} merchants)",
            path.display(),
            taxonomy.len(),
            taxonomy.merchant_count()
        );
        Ok(taxonomy)
    }

    /// Resolve explicit path → data dir override → embedded sample
    pub fn load(path: Option<&Path>) -> Result<Self> {
        TaxonomySource::resolve(path).load()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn merchant_count(&self) -> usize {
        self.categories.iter().map(|c| c.merchants.len()).sum()
    }

    /// SHA-256 over category and merchant names in order (hex).
    ///
    /// Two taxonomies share a fingerprint exactly when they tag identically,
    /// so reloading an unchanged file keeps the same value.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for category in &self.categories {
            hasher.update(category.name.as_bytes());
            hasher.update([0x1e]);
            for merchant in &category.merchants {
                hasher.update(merchant.as_bytes());
                hasher.update([0x1f]);
            }
            hasher.update([0x1d]);
        }
        hex::encode(hasher.finalize())
    }
}

impl<'a> IntoIterator for &'a MerchantTaxonomy {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

impl Serialize for MerchantTaxonomy {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.merchants)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MerchantTaxonomy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TaxonomyVisitor)
    }
}

struct TaxonomyVisitor;

impl<'de> Visitor<'de> for TaxonomyVisitor {
    type Value = MerchantTaxonomy;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping category names to lists of merchant names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut categories: Vec<Category> = Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some((name, merchants)) = map.next_entry::<String, Vec<String>>()? {
            if categories.iter().any(|c| c.name == name) {
                return Err(de::Error::custom(format!("duplicate category '{}'", name)));
            }
            categories.push(Category { name, merchants });
        }

        Ok(MerchantTaxonomy { categories })
    }
}

/// Where a taxonomy was (or will be) loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomySource {
    Embedded,
    File(PathBuf),
}

impl TaxonomySource {
    /// Explicit path, else an existing data dir override, else embedded
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::File(path.to_path_buf());
        }
        match default_taxonomy_path().filter(|p| p.exists()) {
            Some(path) => Self::File(path),
            None => Self::Embedded,
        }
    }

    /// Read the taxonomy from this source (again, on reload)
    pub fn load(&self) -> Result<MerchantTaxonomy> {
        match self {
            Self::Embedded => {
                debug!("Using embedded taxonomy");
                MerchantTaxonomy::embedded()
            }
            Self::File(path) => MerchantTaxonomy::from_file(path),
        }
    }
}

impl fmt::Display for TaxonomySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Serialize for TaxonomySource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Default taxonomy override path
pub fn default_taxonomy_path() -> Option<PathBuf> {
    data_config_dir().map(|d| d.join("merchants.json"))
}
