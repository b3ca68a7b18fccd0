//! Taxonomy listing

use anyhow::{Context, Result};

use super::Sources;

pub fn cmd_taxonomy(sources: &Sources) -> Result<()> {
    let source = sources.taxonomy_source();
    let taxonomy = source
        .load()
        .with_context(|| format!("Failed to load taxonomy from {}", source))?;

    println!("📚 Merchant taxonomy");
    println!("   Source: {}", source);
    println!("   Fingerprint: {}", taxonomy.fingerprint());
    println!(
        "   {} categories, {} merchants",
        taxonomy.len(),
        taxonomy.merchant_count()
    );
    println!();

    if taxonomy.is_empty() {
        println!("No categories. Every message will be tagged Uncategorized.");
        return Ok(());
    }

    let width = taxonomy.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for category in &taxonomy {
        println!(
            "  {:<width$}  {:>3}  {}",
            category.name,
            category.merchants.len(),
            category.merchants.join(", "),
            width = width
        );
    }

    Ok(())
}
