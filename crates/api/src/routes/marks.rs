//! Route definitions for the `/marks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::marks;
use crate::state::AppState;

/// Routes mounted at `/marks`.
///
/// ```text
/// GET    /      -> list (students see own; staff see all)
/// POST   /      -> create (staff)
/// PUT    /{id}  -> update (staff)
/// DELETE /{id}  -> delete (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(marks::list).post(marks::create))
        .route(
            "/{id}",
            axum::routing::put(marks::update).delete(marks::delete),
        )
}
