//! Integration tests for paynote-core
//!
//! These tests run whole messages through the extractor built from the
//! embedded config, sample taxonomy and English stopwords.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use paynote_core::{
    export::{write_csv, BatchRow},
    Direction, ExtractionResult, Extractor, ExtractorConfig, MerchantTaxonomy, StopwordSet,
    UNCATEGORIZED,
};

fn extractor() -> Extractor {
    Extractor::with_defaults().expect("embedded defaults should load")
}

// =============================================================================
// End-to-end messages
// =============================================================================

#[test]
fn test_swiggy_upi_debit() {
    let result = extractor()
        .extract("Rs.500 debited from your account for purchase at Swiggy Bangalore via UPI");

    let ExtractionResult::Transactional(details) = result else {
        panic!("expected a transactional result");
    };
    assert_eq!(details.amount, "500");
    assert_eq!(details.direction, Direction::Debit);
    assert_eq!(details.merchant.as_deref(), Some("Swiggy Bangalore"));
    assert_eq!(details.channel.as_deref(), Some("UPI"));
    assert_eq!(details.tag, "Food Delivery");
}

#[test]
fn test_otp_message() {
    assert_eq!(
        extractor().extract("Your OTP for login is 4521"),
        ExtractionResult::NonTransactional
    );
}

#[test]
fn test_credit_without_merchant() {
    let result = extractor().extract("INR 2,000.00 credited to your account");
    let details = result.details().expect("transactional");

    assert_eq!(details.amount, "2000.00");
    assert_eq!(details.direction, Direction::Credit);
    assert_eq!(details.merchant, None);
    assert_eq!(details.channel, None);
    assert_eq!(details.tag, UNCATEGORIZED);
}

#[test]
fn test_grouped_amount() {
    let result = extractor().extract("Rs. 12,345.50 spent on your card");
    assert_eq!(result.details().unwrap().amount, "12345.50");
}

#[test]
fn test_numeric_merchant_dropped() {
    let result = extractor().extract("Rs 1,200 debited at 4892 for fuel");
    let details = result.details().unwrap();
    assert_eq!(details.merchant, None);
    assert_eq!(details.tag, UNCATEGORIZED);
}

#[test]
fn test_empty_merchant_capture_is_not_replaced() {
    let result = extractor().extract("Rs 50 paid at (Zomato) outlet");
    let details = result.details().expect("transactional");

    assert_eq!(details.merchant, None);
    assert_eq!(details.tag, UNCATEGORIZED);
}

#[test]
fn test_multiline_message_keeps_phrases_on_one_line() {
    let result = extractor().extract("Rs 50 paid to Ravi\nAvl bal Rs 900");
    let details = result.details().expect("transactional");

    assert_eq!(details.amount, "50");
    assert_eq!(details.merchant, None);
    assert_eq!(details.channel, None);
}

#[test]
fn test_markers_override_everything() {
    for message in [
        "Rs 5000 debited. Do not share this verification code",
        "INR 100 credited. Password reset requested",
        "Rs 20 will be debited tomorrow",
    ] {
        assert_eq!(
            extractor().extract(message),
            ExtractionResult::NonTransactional,
            "{}",
            message
        );
    }
}

#[test]
fn test_card_terminal_prefix() {
    let result = extractor().extract("Rs 349 spent on card IN*NETFLIX");
    let details = result.details().unwrap();
    assert_eq!(details.merchant.as_deref(), Some("NETFLIX"));
    assert_eq!(details.tag, "Entertainment");
}

#[test]
fn test_console_rendering() {
    let result = extractor().extract("INR 2,000.00 credited to your account");
    assert_eq!(
        result.to_string(),
        "Status: Success\nAmount: 2000.00\nDirection: credit\nMerchant: N/A\nChannel: N/A\nTag: Uncategorized"
    );
}

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn test_extractor_from_files() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[vocabulary]\ndebit = [\"swiped\"]\n[tagging]\nthreshold = 95").unwrap();

    let mut taxonomy = tempfile::NamedTempFile::new().unwrap();
    write!(taxonomy, r#"{{"Coffee": ["Third Wave"]}}"#).unwrap();

    let mut stopwords = tempfile::NamedTempFile::new().unwrap();
    writeln!(stopwords, "# custom\nnear").unwrap();

    let extractor = Extractor::new(
        ExtractorConfig::load(Some(config.path())).unwrap(),
        Arc::new(MerchantTaxonomy::load(Some(taxonomy.path())).unwrap()),
        Arc::new(StopwordSet::load(Some(stopwords.path())).unwrap()),
    );

    // "near" ends the search key, so the exact name clears the raised threshold
    let result = extractor.extract("Rs 300 swiped to Third Wave near MG Road");
    let details = result.details().unwrap();
    assert_eq!(details.direction, Direction::Debit);
    assert_eq!(details.merchant.as_deref(), Some("Third Wave near MG Road"));
    assert_eq!(details.tag, "Coffee");

    // "spent" is no longer a debit term
    assert!(!extractor.extract("Rs 300 spent").is_transactional());
}

#[test]
fn test_batch_csv_export() {
    let extractor = extractor();
    let messages = [
        "Rs.500 debited from your account for purchase at Swiggy Bangalore via UPI",
        "Your OTP for login is 4521",
    ];
    let rows: Vec<BatchRow> = messages
        .iter()
        .map(|m| BatchRow::new(m, &extractor.extract(m)))
        .collect();

    let mut out = Vec::new();
    write_csv(&mut out, &rows).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();

    assert_eq!(
        lines.next(),
        Some("message,status,amount,direction,merchant,channel,tag")
    );
    assert!(lines
        .next()
        .unwrap()
        .ends_with(",success,500,debit,Swiggy Bangalore,UPI,Food Delivery"));
    assert_eq!(
        lines.next(),
        Some("Your OTP for login is 4521,non_transactional,,,,,")
    );
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_shared_extractor_across_threads() {
    let extractor = Arc::new(extractor());
    let expected = extractor.extract("Rs 250 spent at Zomato via HDFC Card");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let extractor = Arc::clone(&extractor);
            thread::spawn(move || {
                (0..50)
                    .map(|_| extractor.extract("Rs 250 spent at Zomato via HDFC Card"))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for result in handle.join().unwrap() {
            assert_eq!(result, expected);
        }
    }
    assert_eq!(expected.details().unwrap().tag, "Food Delivery");
}
