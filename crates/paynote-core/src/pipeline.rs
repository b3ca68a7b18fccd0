//! Message → [`ExtractionResult`] pipeline
//!
//! Normalize URLs, gate, then pull amount, direction, merchant and channel
//! out of the message and tag the merchant. Performs no I/O; everything it
//! reads was loaded when the [`Extractor`] was built.

use std::sync::Arc;

use tracing::debug;

use crate::channel::resolve_channel;
use crate::config::ExtractorConfig;
use crate::entities::extract_entities;
use crate::error::Result;
use crate::merchant::resolve_merchant;
use crate::models::{ExtractionResult, TransactionDetails};
use crate::normalize::normalize_message;
use crate::stopwords::StopwordSet;
use crate::tags::MerchantTagger;
use crate::taxonomy::MerchantTaxonomy;
use crate::vocabulary::Gate;

/// Shared, immutable extraction context.
///
/// Cheap to clone and safe to share between threads; the taxonomy and
/// stopwords are reference counted and never mutated.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    taxonomy: Arc<MerchantTaxonomy>,
    stopwords: Arc<StopwordSet>,
}

impl Extractor {
    pub fn new(
        config: ExtractorConfig,
        taxonomy: Arc<MerchantTaxonomy>,
        stopwords: Arc<StopwordSet>,
    ) -> Self {
        Self {
            config,
            taxonomy,
            stopwords,
        }
    }

    /// Embedded config, sample taxonomy and English stopwords
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            ExtractorConfig::embedded()?,
            Arc::new(MerchantTaxonomy::embedded()?),
            Arc::new(StopwordSet::english()),
        ))
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &Arc<MerchantTaxonomy> {
        &self.taxonomy
    }

    pub fn stopwords(&self) -> &Arc<StopwordSet> {
        &self.stopwords
    }

    /// Same config and stopwords, different taxonomy
    pub fn with_taxonomy(&self, taxonomy: Arc<MerchantTaxonomy>) -> Self {
        Self {
            config: self.config.clone(),
            taxonomy,
            stopwords: Arc::clone(&self.stopwords),
        }
    }

    /// Run one message through the pipeline. Never fails: anything that
    /// cannot be found is left absent.
    pub fn extract(&self, message: &str) -> ExtractionResult {
        let text = normalize_message(message);
        let lower = text.to_lowercase();
        let vocabulary = &self.config.vocabulary;

        let amount = match vocabulary.gate(&text, &lower) {
            Gate::Admitted { amount } => amount,
            Gate::Rejected(reason) => {
                debug!("Non-transactional: {}", reason);
                return ExtractionResult::NonTransactional;
            }
        };

        let direction = vocabulary.direction(&lower);
        let entities = extract_entities(&text);
        let merchant = resolve_merchant(&text, &entities, &self.stopwords);
        let channel = resolve_channel(&text, &entities);

        let tagger = MerchantTagger::new(&self.taxonomy, self.config.threshold);
        let tag = tagger.tag(merchant.as_ref().map(|m| m.search_key.as_str()));

        debug!(
            "Extracted amount={} direction={} merchant={:?} channel={:?} tag={}",
            amount,
            direction,
            merchant.as_ref().map(|m| m.original.as_str()),
            channel,
            tag
        );

        ExtractionResult::Transactional(TransactionDetails {
            amount,
            direction,
            merchant: merchant.map(|m| m.original),
            channel,
            tag,
        })
    }

    /// [`Self::extract`] over many messages, in order
    pub fn extract_all<'m, I>(&self, messages: I) -> Vec<ExtractionResult>
    where
        I: IntoIterator<Item = &'m str>,
    {
        messages.into_iter().map(|m| self.extract(m)).collect()
    }
}
