//! Fuzzy merchant → category tagging
//!
//! Categories are tried in taxonomy order and the first one whose best
//! merchant similarity is strictly above the threshold wins, even when a
//! later category would score higher.

use tracing::debug;

use crate::fuzzy::best_match;
use crate::models::UNCATEGORIZED;
use crate::taxonomy::MerchantTaxonomy;

/// A category match for a merchant search key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAssignment<'a> {
    pub category: &'a str,
    /// Taxonomy name that scored best within the category
    pub matched: &'a str,
    pub score: u8,
}

/// Assigns taxonomy categories to merchant search keys
#[derive(Debug, Clone, Copy)]
pub struct MerchantTagger<'a> {
    taxonomy: &'a MerchantTaxonomy,
    threshold: u8,
}

impl<'a> MerchantTagger<'a> {
    pub fn new(taxonomy: &'a MerchantTaxonomy, threshold: u8) -> Self {
        Self {
            taxonomy,
            threshold,
        }
    }

    /// First category whose best score exceeds the threshold
    pub fn assign(&self, search_key: &str) -> Option<TagAssignment<'a>> {
        let key = search_key.to_lowercase();

        for category in self.taxonomy {
            let Some((index, score)) = best_match(&key, &category.merchants) else {
                continue;
            };
            if score > self.threshold {
                let assignment = TagAssignment {
                    category: &category.name,
                    matched: &category.merchants[index],
                    score,
                };
                debug!(
                    "Tagged '{}' as {} (matched '{}', score {})",
                    search_key, assignment.category, assignment.matched, score
                );
                return Some(assignment);
            }
        }

        debug!(
            "No category above {} for '{}'",
            self.threshold, search_key
        );
        None
    }

    /// Category name for an optional search key, [`UNCATEGORIZED`] otherwise
    pub fn tag(&self, search_key: Option<&str>) -> String {
        search_key
            .and_then(|key| self.assign(key))
            .map_or_else(|| UNCATEGORIZED.to_string(), |a| a.category.to_string())
    }
}
