//! Route definitions for the `/materials` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::materials;
use crate::state::AppState;

/// Routes mounted at `/materials`.
///
/// ```text
/// GET    /      -> list (any authenticated user)
/// POST   /      -> create (staff, multipart)
/// DELETE /{id}  -> delete (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(materials::list).post(materials::create))
        .route("/{id}", axum::routing::delete(materials::delete))
}
