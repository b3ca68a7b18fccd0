//! Extraction API handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::{AppError, AppState, MAX_BATCH_SIZE, MAX_MESSAGE_LEN};
use paynote_core::ExtractionResult;

/// Request body for single-message extraction
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub message: String,
}

/// Request body for batch extraction
#[derive(Debug, Deserialize)]
pub struct BatchExtractRequest {
    pub messages: Vec<String>,
}

/// POST /api/extract - Extract transaction details from one message
pub async fn extract_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractionResult>, AppError> {
    validate_message(&req.message).map_err(|msg| AppError::bad_request(&msg))?;

    let result = state.snapshot().extractor.extract(&req.message);
    Ok(Json(result))
}

/// POST /api/extract/batch - Extract from many messages, results in input order
pub async fn extract_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchExtractRequest>,
) -> Result<Json<Vec<ExtractionResult>>, AppError> {
    if req.messages.len() > MAX_BATCH_SIZE {
        return Err(AppError::payload_too_large(&format!(
            "At most {} messages per batch",
            MAX_BATCH_SIZE
        )));
    }

    for (i, message) in req.messages.iter().enumerate() {
        validate_message(message)
            .map_err(|msg| AppError::bad_request(&format!("messages[{}]: {}", i, msg)))?;
    }

    // One snapshot for the whole batch, even if a reload lands mid-way
    let snapshot = state.snapshot();
    let results = snapshot
        .extractor
        .extract_all(req.messages.iter().map(String::as_str));

    debug!(
        "Batch of {} messages, {} transactional",
        results.len(),
        results.iter().filter(|r| r.is_transactional()).count()
    );

    Ok(Json(results))
}

fn validate_message(message: &str) -> Result<(), String> {
    if message.trim().is_empty() {
        return Err("Message must not be empty".to_string());
    }
    if message.len() > MAX_MESSAGE_LEN {
        return Err(format!("Message exceeds {} bytes", MAX_MESSAGE_LEN));
    }
    Ok(())
}
