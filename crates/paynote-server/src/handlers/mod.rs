//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific area.

pub mod extract;
pub mod form;
pub mod taxonomy;

// Re-export all handlers for use in router
pub use extract::*;
pub use form::*;
pub use taxonomy::*;

use axum::Json;

/// GET /api/health - Liveness probe (no auth)
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
