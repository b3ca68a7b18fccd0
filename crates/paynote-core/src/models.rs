//! Domain models for Paynote

use serde::{Deserialize, Serialize};

/// Tag assigned when no taxonomy category qualifies
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Placeholder shown for absent optional fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Status line rendered for rejected messages
pub const NON_TRANSACTIONAL_STATUS: &str = "Non-transactional message.";

/// Money direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Debit,
    Credit,
    Unknown,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields extracted from a transactional message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    /// Digits with at most one decimal point, grouping separators removed
    pub amount: String,
    pub direction: Direction,
    /// Merchant as it appeared in the message (never the truncated search key)
    pub merchant: Option<String>,
    /// Card / bank / UPI reference
    pub channel: Option<String>,
    /// Taxonomy category or [`UNCATEGORIZED`]
    pub tag: String,
}

/// Outcome of running one message through the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ExtractionResult {
    #[serde(rename = "non_transactional")]
    NonTransactional,
    #[serde(rename = "success")]
    Transactional(TransactionDetails),
}

impl ExtractionResult {
    pub fn is_transactional(&self) -> bool {
        matches!(self, Self::Transactional(_))
    }

    pub fn details(&self) -> Option<&TransactionDetails> {
        match self {
            Self::Transactional(details) => Some(details),
            Self::NonTransactional => None,
        }
    }

    /// Short status label ("Success" / "Non-transactional message.")
    pub fn status(&self) -> &'static str {
        match self {
            Self::Transactional(_) => "Success",
            Self::NonTransactional => NON_TRANSACTIONAL_STATUS,
        }
    }

    /// Label/value pairs in display order, with placeholders for absent fields.
    ///
    /// Both the console and the web form render from this, so the field order
    /// stays identical between front ends.
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        let details = match self {
            Self::NonTransactional => return vec![("Status", self.status().to_string())],
            Self::Transactional(details) => details,
        };

        let tag = if details.tag.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            details.tag.clone()
        };

        vec![
            ("Status", self.status().to_string()),
            ("Amount", details.amount.clone()),
            ("Direction", details.direction.to_string()),
            ("Merchant", or_not_available(details.merchant.as_deref())),
            ("Channel", or_not_available(details.channel.as_deref())),
            ("Tag", tag),
        ]
    }
}

impl std::fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Self::NonTransactional = self {
            return write!(f, "{}", NON_TRANSACTIONAL_STATUS);
        }
        let fields = self.display_fields();
        for (i, (label, value)) in fields.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}

fn or_not_available(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}
