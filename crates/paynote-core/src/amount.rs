//! Monetary amount extraction

use crate::patterns::{amount_re, first_capture};

/// Find the first amount in a message and return it without grouping commas.
///
/// The value is kept as a decimal string (no rounding, no currency
/// conversion). `None` means the message carries no amount, which the
/// gatekeeper treats as non-transactional.
pub fn extract_amount(text: &str) -> Option<String> {
    first_capture(amount_re(), text).map(|literal| literal.replace(',', ""))
}
