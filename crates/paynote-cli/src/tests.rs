//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use clap::Parser;
use paynote_core::{ExtractionResult, TaxonomySource};
use tempfile::{NamedTempFile, TempDir};

use crate::cli::{Cli, Commands};
use crate::commands::{self, Sources};

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_no_subcommand_is_interactive() {
    let cli = Cli::parse_from(["paynote"]);
    assert!(cli.command.is_none());
    assert!(!cli.verbose);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "paynote",
        "extract",
        "Rs 10 debited",
        "--json",
        "--taxonomy",
        "mine.json",
        "-v",
    ]);
    assert_eq!(cli.taxonomy, Some(PathBuf::from("mine.json")));
    assert!(cli.verbose);
    match cli.command {
        Some(Commands::Extract { message, json }) => {
            assert_eq!(message.as_deref(), Some("Rs 10 debited"));
            assert!(json);
        }
        _ => panic!("expected extract"),
    }
}

#[test]
fn test_batch_defaults() {
    let cli = Cli::parse_from(["paynote", "batch", "--file", "in.txt"]);
    match cli.command {
        Some(Commands::Batch {
            file,
            output,
            format,
        }) => {
            assert_eq!(file, PathBuf::from("in.txt"));
            assert!(output.is_none());
            assert_eq!(format, "csv");
        }
        _ => panic!("expected batch"),
    }
}

#[test]
fn test_serve_defaults() {
    let cli = Cli::parse_from(["paynote", "serve"]);
    match cli.command {
        Some(Commands::Serve {
            port,
            host,
            no_auth,
        }) => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
            assert!(!no_auth);
        }
        _ => panic!("expected serve"),
    }
}

// ========== Sources Tests ==========

#[test]
fn test_sources_explicit_files() {
    let config = write_temp("[tagging]\nthreshold = 70\n");
    let taxonomy = write_temp(r#"{"Coffee": ["Blue Tokai"]}"#);
    let stopwords = write_temp("near\n");

    let sources = Sources {
        config: Some(config.path().to_path_buf()),
        taxonomy: Some(taxonomy.path().to_path_buf()),
        stopwords: Some(stopwords.path().to_path_buf()),
    };

    assert_eq!(
        sources.taxonomy_source(),
        TaxonomySource::File(taxonomy.path().to_path_buf())
    );

    let extractor = sources.load_extractor().unwrap();
    assert_eq!(extractor.config().threshold, 70);
    assert_eq!(extractor.stopwords().len(), 1);
    assert_eq!(extractor.taxonomy().categories()[0].name, "Coffee");
}

#[test]
fn test_sources_bad_taxonomy_reports_path() {
    let taxonomy = write_temp("[1, 2]");
    let sources = Sources {
        taxonomy: Some(taxonomy.path().to_path_buf()),
        ..Default::default()
    };

    let err = sources.load_extractor().unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to load taxonomy"));
}

// ========== Extract Command Tests ==========

#[test]
fn test_prompt_message_reads_one_line() {
    let mut input = Cursor::new("Rs 500 debited at Swiggy\r\nsecond line\n");
    let mut output = Vec::new();

    let message = commands::prompt_message(&mut input, &mut output).unwrap();

    assert_eq!(message, "Rs 500 debited at Swiggy");
    assert_eq!(String::from_utf8(output).unwrap(), "Enter the SMS message: ");
}

#[test]
fn test_prompt_message_empty_input() {
    let mut input = Cursor::new("");
    let mut output = Vec::new();
    assert_eq!(commands::prompt_message(&mut input, &mut output).unwrap(), "");
}

#[test]
fn test_render_result_text_and_json() {
    let extractor = Sources::default().load_extractor().unwrap();
    let result = extractor
        .extract("Rs.500 debited from your account for purchase at Swiggy Bangalore via UPI");

    let text = commands::render_result(&result, false).unwrap();
    assert!(text.starts_with("Status: Success\nAmount: 500\n"));
    assert!(text.ends_with("Tag: Food Delivery"));

    let json: serde_json::Value =
        serde_json::from_str(&commands::render_result(&result, true).unwrap()).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["channel"], "UPI");

    let rejected = commands::render_result(&ExtractionResult::NonTransactional, false).unwrap();
    assert_eq!(rejected, "Non-transactional message.");
}

#[test]
fn test_cmd_extract_with_message() {
    let result = commands::cmd_extract(&Sources::default(), Some("Rs 10 debited"), true);
    assert!(result.is_ok());
}

// ========== Batch Command Tests ==========

#[test]
fn test_run_batch_skips_blank_lines() {
    let extractor = Sources::default().load_extractor().unwrap();
    let rows = commands::run_batch(
        &extractor,
        "Rs 250 spent at Zomato\n\n   \nYour OTP for login is 4521\n",
    );

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].status, "success");
    assert_eq!(rows[0].tag.as_deref(), Some("Food Delivery"));
    assert_eq!(rows[1].status, "non_transactional");
}

#[test]
fn test_cmd_batch_writes_csv() {
    let input = write_temp(
        "Rs.500 debited from your account for purchase at Swiggy Bangalore via UPI\nINR 2,000.00 credited to your account\n",
    );
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    commands::cmd_batch(&Sources::default(), input.path(), Some(&output), "csv").unwrap();

    let csv = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "message,status,amount,direction,merchant,channel,tag");
    assert!(lines[1].ends_with("success,500,debit,Swiggy Bangalore,UPI,Food Delivery"));
    assert!(lines[2].ends_with("success,2000.00,credit,,,Uncategorized"));
}

#[test]
fn test_cmd_batch_writes_json() {
    let input = write_temp("Rs 10 debited\n");
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");

    commands::cmd_batch(&Sources::default(), input.path(), Some(&output), "json").unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["amount"], "10");
}

#[test]
fn test_cmd_batch_rejects_unknown_format() {
    let input = write_temp("Rs 10 debited\n");
    let result = commands::cmd_batch(&Sources::default(), input.path(), None, "xml");
    assert!(result.is_err());
}

#[test]
fn test_cmd_batch_missing_input() {
    let result = commands::cmd_batch(
        &Sources::default(),
        std::path::Path::new("/no/such/messages.txt"),
        None,
        "csv",
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to read input file"));
}

// ========== Taxonomy / Config Command Tests ==========

#[test]
fn test_cmd_taxonomy() {
    let taxonomy = write_temp(r#"{"Coffee": ["Blue Tokai", "Third Wave"]}"#);
    let sources = Sources {
        taxonomy: Some(taxonomy.path().to_path_buf()),
        ..Default::default()
    };
    assert!(commands::cmd_taxonomy(&sources).is_ok());
}

#[test]
fn test_cmd_taxonomy_empty() {
    let taxonomy = write_temp("{}");
    let sources = Sources {
        taxonomy: Some(taxonomy.path().to_path_buf()),
        ..Default::default()
    };
    assert!(commands::cmd_taxonomy(&sources).is_ok());
}

#[test]
fn test_cmd_config() {
    let config = write_temp("[tagging]\nthreshold = 75\n");
    let sources = Sources {
        config: Some(config.path().to_path_buf()),
        ..Default::default()
    };
    assert!(commands::cmd_config(&sources).is_ok());
}

#[test]
fn test_cmd_config_invalid_file() {
    let config = write_temp("[tagging]\nthreshold = \"high\"\n");
    let sources = Sources {
        config: Some(config.path().to_path_buf()),
        ..Default::default()
    };
    assert!(commands::cmd_config(&sources).is_err());
}
