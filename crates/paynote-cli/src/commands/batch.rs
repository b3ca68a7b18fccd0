//! Batch extraction from a message file

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use paynote_core::export::{write_rows, BatchRow, ExportFormat};
use paynote_core::Extractor;
use tracing::info;

use super::Sources;

pub fn cmd_batch(
    sources: &Sources,
    file: &Path,
    output: Option<&Path>,
    format: &str,
) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let extractor = sources.load_extractor()?;

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read input file: {}", file.display()))?;

    let rows = run_batch(&extractor, &content);
    let transactional = rows.iter().filter(|r| r.status == "success").count();

    match output {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(out);
            write_rows(&mut writer, &rows, format)?;
            writer.flush()?;
            println!(
                "✅ Wrote {} results ({} transactional) to {}",
                rows.len(),
                transactional,
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_rows(&mut stdout, &rows, format)?;
            if format == ExportFormat::Json {
                writeln!(stdout)?;
            }
        }
    }

    info!(
        "Processed {} messages, {} transactional",
        rows.len(),
        transactional
    );

    Ok(())
}

/// One row per non-blank line, in file order
pub fn run_batch(extractor: &Extractor, content: &str) -> Vec<BatchRow> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| BatchRow::new(line, &extractor.extract(line)))
        .collect()
}
