//! Keyword vocabularies, transaction gating and direction classification
//!
//! All checks are plain substring tests against the lowercased message, so
//! "debited" also matches inside "undebited" and "code" inside "barcode".
//! The vocabularies are tuned for English bank notifications.

use serde::{Deserialize, Serialize};

use crate::amount::extract_amount;
use crate::models::Direction;

const DEFAULT_DEBIT: &[&str] = &[
    "debited",
    "withdrawn",
    "spent",
    "paid",
    "deducted",
    "charged",
    "purchase",
    "payment",
    "transfer",
    "debit",
    "sent",
];

const DEFAULT_CREDIT: &[&str] = &[
    "credited",
    "deposited",
    "received",
    "added",
    "refund",
    "reversed",
    "refunded",
];

const DEFAULT_NON_TRANSACTIONAL: &[&str] = &[
    "will",
    "otp",
    "password",
    "login",
    "verification",
    "code",
    "alert",
    "update",
];

/// Keyword sets driving the gate and the direction classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub debit: Vec<String>,
    pub credit: Vec<String>,
    /// Markers of OTP / login / informational messages
    pub non_transactional: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            owned(DEFAULT_DEBIT),
            owned(DEFAULT_CREDIT),
            owned(DEFAULT_NON_TRANSACTIONAL),
        )
    }
}

impl Vocabulary {
    /// Build a vocabulary; terms are lowercased and blanks dropped.
    pub fn new(debit: Vec<String>, credit: Vec<String>, non_transactional: Vec<String>) -> Self {
        Self {
            debit: clean(debit),
            credit: clean(credit),
            non_transactional: clean(non_transactional),
        }
    }

    /// First non-transactional marker present in `lower`, if any
    pub fn non_transactional_marker<'a>(&'a self, lower: &str) -> Option<&'a str> {
        find_term(&self.non_transactional, lower)
    }

    /// Whether any debit or credit term appears in `lower`
    pub fn mentions_transaction(&self, lower: &str) -> bool {
        find_term(&self.debit, lower).is_some() || find_term(&self.credit, lower).is_some()
    }

    /// Debit wins whenever a debit term appears, even if credit terms do too.
    pub fn direction(&self, lower: &str) -> Direction {
        if find_term(&self.debit, lower).is_some() {
            Direction::Debit
        } else if find_term(&self.credit, lower).is_some() {
            Direction::Credit
        } else {
            Direction::Unknown
        }
    }

    /// Decide whether a (URL-normalized) message is transactional.
    ///
    /// A marker rejects the message before anything else is looked at.
    /// Otherwise both a transaction keyword and a parseable amount are
    /// required; the amount travels with the admission so it is only
    /// extracted once.
    pub fn gate(&self, text: &str, lower: &str) -> Gate {
        if let Some(marker) = self.non_transactional_marker(lower) {
            return Gate::Rejected(RejectReason::Marker(marker.to_string()));
        }
        if !self.mentions_transaction(lower) {
            return Gate::Rejected(RejectReason::NoKeyword);
        }
        match extract_amount(text) {
            Some(amount) => Gate::Admitted { amount },
            None => Gate::Rejected(RejectReason::NoAmount),
        }
    }
}

/// Outcome of the transactional gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Admitted { amount: String },
    Rejected(RejectReason),
}

/// Why a message was classified non-transactional
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Contained a non-transactional marker (OTP, login, ...)
    Marker(String),
    /// No debit or credit keyword
    NoKeyword,
    /// Keyword present but no amount
    NoAmount,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Marker(marker) => write!(f, "marker '{}'", marker),
            Self::NoKeyword => write!(f, "no transaction keyword"),
            Self::NoAmount => write!(f, "no amount"),
        }
    }
}

fn find_term<'a>(terms: &'a [String], lower: &str) -> Option<&'a str> {
    terms
        .iter()
        .find(|term| lower.contains(term.as_str()))
        .map(String::as_str)
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

fn clean(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
