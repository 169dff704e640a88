//! Health check route, mounted at the root (not under `/api/v1`).

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Routes mounted at `/`.
///
/// ```text
/// GET /health -> liveness probe
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
///
/// Liveness probe: returns 200 with a static body once the server is up.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
