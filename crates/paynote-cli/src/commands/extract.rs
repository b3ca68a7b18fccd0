//! Single-message extraction

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use paynote_core::ExtractionResult;

use super::Sources;

/// Console prompt for interactive use
pub const PROMPT: &str = "Enter the SMS message: ";

pub fn cmd_extract(sources: &Sources, message: Option<&str>, json: bool) -> Result<()> {
    let extractor = sources.load_extractor()?;

    let message = match message {
        Some(m) => m.to_string(),
        None => prompt_message(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let result = extractor.extract(&message);
    println!("{}", render_result(&result, json)?);

    Ok(())
}

/// Write the prompt and read one line, without its line ending
pub fn prompt_message<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read message")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Console text (one `Label: value` line per field) or pretty JSON
pub fn render_result(result: &ExtractionResult, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(result).context("Failed to serialize result")
    } else {
        Ok(result.to_string())
    }
}
