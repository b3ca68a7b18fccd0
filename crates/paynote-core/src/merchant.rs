//! Merchant resolution and stopword truncation
//!
//! Produces two forms of the merchant:
//! - `original`: the text as found (trimmed), which is what users see
//! - `search_key`: the leading words before the first stopword, used only
//!   for fuzzy tagging ("Swiggy for food" → "Swiggy")

use tracing::debug;

use crate::entities::Entities;
use crate::patterns::{first_capture, merchant_re};
use crate::stopwords::StopwordSet;

/// Where the merchant text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerchantSource {
    /// The dedicated `" at "` / `in*` pattern
    Pattern,
    /// First at / to / from phrase
    Entity,
}

/// A merchant found in a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMerchant {
    pub original: String,
    pub search_key: String,
    pub source: MerchantSource,
}

/// Pick the merchant for a message.
///
/// The merchant pattern wins over entity phrases: once it matches, its
/// capture is the merchant even when empty. The chosen text is
/// dropped when it, or its search key, is purely numeric (counters such as
/// "at 4892") or when the search key is empty ("to your account").
pub fn resolve_merchant(
    text: &str,
    entities: &Entities<'_>,
    stopwords: &StopwordSet,
) -> Option<ResolvedMerchant> {
    let (original, source) = match first_capture(merchant_re(), text) {
        Some(m) => (m.trim(), MerchantSource::Pattern),
        None => (
            entities
                .merchant_candidates()
                .map(str::trim)
                .find(|s| !s.is_empty())?,
            MerchantSource::Entity,
        ),
    };

    if original.is_empty() {
        debug!("Merchant pattern matched with an empty capture");
        return None;
    }

    if is_numeric(original) {
        debug!("Discarding numeric merchant '{}'", original);
        return None;
    }

    let search_key = truncate_at_stopword(original, stopwords);
    if search_key.is_empty() || is_numeric(&search_key) {
        debug!(
            "Discarding merchant '{}' (search key '{}')",
            original, search_key
        );
        return None;
    }

    debug!(
        "Merchant '{}' from {:?} (search key '{}')",
        original, source, search_key
    );

    Some(ResolvedMerchant {
        original: original.to_string(),
        search_key,
        source,
    })
}

/// Leading whitespace-separated words up to (not including) the first
/// stopword, joined with single spaces.
///
/// Idempotent: truncating an already-truncated name returns it unchanged.
pub fn truncate_at_stopword(name: &str, stopwords: &StopwordSet) -> String {
    name.split_whitespace()
        .take_while(|word| !stopwords.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::extract_entities;

    fn resolve(text: &str) -> Option<ResolvedMerchant> {
        resolve_merchant(text, &extract_entities(text), &StopwordSet::english())
    }

    #[test]
    fn test_truncation_stops_at_first_stopword() {
        let stopwords = StopwordSet::english();
        assert_eq!(truncate_at_stopword("Swiggy for food", &stopwords), "Swiggy");
        assert_eq!(
            truncate_at_stopword("Big   Bazaar on MG Road", &stopwords),
            "Big Bazaar"
        );
        assert_eq!(truncate_at_stopword("The Store", &stopwords), "");
    }

    #[test]
    fn test_truncation_idempotent() {
        let stopwords = StopwordSet::english();
        for name in ["Swiggy Bangalore for lunch", "a b c", "Amazon  Pay", ""] {
            let once = truncate_at_stopword(name, &stopwords);
            assert_eq!(truncate_at_stopword(&once, &stopwords), once);
        }
    }

    #[test]
    fn test_empty_stopwords_keep_whole_name() {
        assert_eq!(
            truncate_at_stopword("Swiggy for food", &StopwordSet::empty()),
            "Swiggy for food"
        );
    }

    #[test]
    fn test_pattern_beats_entity() {
        let merchant =
            resolve("Rs 99 paid to Ravi at Chai Point via UPI").unwrap();
        assert_eq!(merchant.original, "Chai Point");
        assert_eq!(merchant.source, MerchantSource::Pattern);
    }

    #[test]
    fn test_entity_fallback() {
        let merchant = resolve("Rs 99 sent to Ravi Kumar via UPI").unwrap();
        assert_eq!(merchant.original, "Ravi Kumar");
        assert_eq!(merchant.search_key, "Ravi Kumar");
        assert_eq!(merchant.source, MerchantSource::Entity);
    }

    #[test]
    fn test_original_preserved_key_truncated() {
        let merchant = resolve("Rs 450 spent at Dominos for dinner").unwrap();
        assert_eq!(merchant.original, "Dominos for");
        assert_eq!(merchant.search_key, "Dominos");
    }

    #[test]
    fn test_numeric_merchant_discarded() {
        assert_eq!(resolve("Rs 100 debited at 4892 for fuel"), None);
        assert_eq!(resolve("Rs 100 debited at 4892"), None);
    }

    #[test]
    fn test_stopword_only_merchant_discarded() {
        assert_eq!(resolve("INR 2,000.00 credited to your account"), None);
    }

    #[test]
    fn test_empty_pattern_capture_has_no_fallback() {
        assert_eq!(resolve("Rs 50 paid at #42 Cafe to Ravi"), None);
        assert_eq!(resolve("Rs 50 paid at (Zomato) outlet"), None);
    }

    #[test]
    fn test_no_merchant() {
        assert_eq!(resolve("Rs 100 debited"), None);
    }
}
