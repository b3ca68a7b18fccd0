//! Resolved configuration sources

use anyhow::{Context, Result};
use paynote_core::{config, stopwords, ExtractorConfig, StopwordSet};

use super::Sources;

pub fn cmd_config(sources: &Sources) -> Result<()> {
    let config_path = config::resolve_path(sources.config.as_deref());
    let stopwords_path = stopwords::resolve_path(sources.stopwords.as_deref());

    let extractor_config = ExtractorConfig::load(sources.config.as_deref())
        .context("Failed to load extractor config")?;
    let stopwords =
        StopwordSet::load(sources.stopwords.as_deref()).context("Failed to load stopwords")?;

    println!("⚙️  Paynote configuration");
    match config::data_config_dir() {
        Some(dir) => println!("   Override dir: {}", dir.display()),
        None => println!("   Override dir: (unavailable on this platform)"),
    }
    println!("   Config: {}", describe(config_path.as_deref()));
    println!("   Taxonomy: {}", sources.taxonomy_source());
    println!(
        "   Stopwords: {} ({} words)",
        describe(stopwords_path.as_deref()),
        stopwords.len()
    );
    println!();
    println!("   Tagging threshold: {}", extractor_config.threshold);

    let vocab = &extractor_config.vocabulary;
    println!("   Debit terms: {}", vocab.debit.join(", "));
    println!("   Credit terms: {}", vocab.credit.join(", "));
    println!(
        "   Non-transactional markers: {}",
        vocab.non_transactional.join(", ")
    );

    Ok(())
}

fn describe(path: Option<&std::path::Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "embedded".to_string())
}
