//! Route definitions for the `/files` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

/// Routes mounted at `/files`.
///
/// ```text
/// GET /{name} -> download stored document (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{name}", get(files::download))
}
