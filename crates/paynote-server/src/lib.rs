//! Paynote Web Server
//!
//! Axum-based front end for the extractor: an HTML form at `/` and a JSON
//! API under `/api`.
//!
//! Security features:
//! - API key authentication (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Input validation (message and batch size limits)
//! - Sanitized error responses

use std::sync::{Arc, RwLock};

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use paynote_core::{Extractor, TaxonomySource};

mod handlers;

/// Maximum number of messages in one batch request
pub const MAX_BATCH_SIZE: usize = 1000;

/// Maximum length of a single message, in bytes
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys accepted as "Bearer <key>" in the Authorization header
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

/// Extractor plus the metadata of the taxonomy it was built with.
///
/// Replaced as a whole on reload; handlers hold an `Arc` to one snapshot
/// for the duration of a request.
pub struct Snapshot {
    pub extractor: Extractor,
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(extractor: Extractor) -> Self {
        let fingerprint = extractor.taxonomy().fingerprint();
        Self {
            extractor,
            fingerprint,
            loaded_at: Utc::now(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
    /// Where reloads read the taxonomy from
    pub taxonomy_source: TaxonomySource,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl AppState {
    pub fn new(extractor: Extractor, taxonomy_source: TaxonomySource, config: ServerConfig) -> Self {
        Self {
            config,
            taxonomy_source,
            snapshot: RwLock::new(Arc::new(Snapshot::new(extractor))),
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.snapshot.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Re-read the taxonomy and swap in a new snapshot.
    ///
    /// The new extractor is fully built before the lock is taken, so
    /// in-flight requests finish on the old snapshot. On error the current
    /// snapshot stays active.
    pub fn reload_taxonomy(&self) -> paynote_core::Result<Arc<Snapshot>> {
        let taxonomy = self.taxonomy_source.load()?;
        let extractor = self.snapshot().extractor.with_taxonomy(Arc::new(taxonomy));
        let fresh = Arc::new(Snapshot::new(extractor));

        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::clone(&fresh);
        drop(guard);

        info!(
            source = %self.taxonomy_source,
            fingerprint = %fresh.fingerprint,
            "Taxonomy reloaded"
        );
        Ok(fresh)
    }
}

/// Authentication middleware - validates API keys
///
/// Keys are compared in constant time. `/api/health` is always reachable.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth || request.uri().path() == "/api/health" {
        return next.run(request).await;
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        info!(user = "api-key", path = %request.uri().path(), "Authenticated via API key");
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid auth");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Validate an API key against the configured keys using constant-time comparison
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    valid_keys.iter().any(|key| {
        let key_bytes = key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes))
    })
}

/// Parse a comma-separated key list (e.g. `PAYNOTE_API_KEYS`)
pub fn parse_api_keys(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();
    let state = Arc::new(state);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/extract", post(handlers::extract_message))
        .route("/extract/batch", post(handlers::extract_batch))
        .route("/taxonomy", get(handlers::get_taxonomy))
        .route("/taxonomy/reload", post(handlers::reload_taxonomy));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    // The form page carries its own <style> block and no scripts
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'none'; style-src 'self' 'unsafe-inline'; form-action 'self'; frame-ancestors 'none'",
    );

    Router::new()
        .route("/", get(handlers::form_page).post(handlers::form_submit))
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ))
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    extractor: Extractor,
    taxonomy_source: TaxonomySource,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    } else if config.api_keys.is_empty() {
        warn!("No API keys configured; every request except /api/health will be rejected");
    }

    let state = AppState::new(extractor, taxonomy_source, config);
    let app = create_router(state);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn payload_too_large(msg: &str) -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// 500 with a client-facing message; `err` is only logged
    pub fn internal(msg: &str, err: impl Into<anyhow::Error>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: Some(err.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err.into()),
        }
    }
}
