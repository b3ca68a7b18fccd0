//! Batch result export (CSV and JSON)

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::ExtractionResult;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(Error::InvalidData(format!("Unknown export format: {}", s))),
        }
    }
}

/// One flattened row per input message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    pub message: String,
    /// `success` or `non_transactional`
    pub status: String,
    pub amount: Option<String>,
    pub direction: Option<String>,
    pub merchant: Option<String>,
    pub channel: Option<String>,
    pub tag: Option<String>,
}

impl BatchRow {
    pub fn new(message: &str, result: &ExtractionResult) -> Self {
        match result.details() {
            None => Self {
                message: message.to_string(),
                status: "non_transactional".to_string(),
                amount: None,
                direction: None,
                merchant: None,
                channel: None,
                tag: None,
            },
            Some(details) => Self {
                message: message.to_string(),
                status: "success".to_string(),
                amount: Some(details.amount.clone()),
                direction: Some(details.direction.to_string()),
                merchant: details.merchant.clone(),
                channel: details.channel.clone(),
                tag: Some(details.tag.clone()),
            },
        }
    }
}

/// CSV with header `message,status,amount,direction,merchant,channel,tag`;
/// absent values are empty cells.
pub fn write_csv<W: Write>(writer: W, rows: &[BatchRow]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Pretty-printed JSON array of rows
pub fn write_json<W: Write>(writer: W, rows: &[BatchRow]) -> Result<()> {
    serde_json::to_writer_pretty(writer, rows)?;
    Ok(())
}

pub fn write_rows<W: Write>(writer: W, rows: &[BatchRow], format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(writer, rows),
        ExportFormat::Json => write_json(writer, rows),
    }
}
