//! Taxonomy inspection and reload handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{AppError, AppState, Snapshot};
use paynote_core::Category;

/// Active taxonomy as reported by the API
#[derive(Debug, Serialize)]
pub struct TaxonomyInfo {
    pub source: String,
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
    pub categories: Vec<Category>,
}

impl TaxonomyInfo {
    fn new(state: &AppState, snapshot: &Snapshot) -> Self {
        Self {
            source: state.taxonomy_source.to_string(),
            fingerprint: snapshot.fingerprint.clone(),
            loaded_at: snapshot.loaded_at,
            categories: snapshot.extractor.taxonomy().categories().to_vec(),
        }
    }
}

/// GET /api/taxonomy - Show the active taxonomy
pub async fn get_taxonomy(State(state): State<Arc<AppState>>) -> Json<TaxonomyInfo> {
    let snapshot = state.snapshot();
    Json(TaxonomyInfo::new(&state, &snapshot))
}

/// POST /api/taxonomy/reload - Re-read the taxonomy source and swap it in
///
/// The file read and rebuild run on the blocking pool.
pub async fn reload_taxonomy(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TaxonomyInfo>, AppError> {
    const FAILED: &str = "Failed to reload taxonomy; the previous one is still active";

    let reloader = Arc::clone(&state);
    let snapshot = tokio::task::spawn_blocking(move || reloader.reload_taxonomy())
        .await
        .map_err(|e| AppError::internal(FAILED, e))?
        .map_err(|e| AppError::internal(FAILED, e))?;

    Ok(Json(TaxonomyInfo::new(&state, &snapshot)))
}
