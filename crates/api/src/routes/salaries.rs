//! Route definitions for the `/salaries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::salaries;
use crate::state::AppState;

/// Routes mounted at `/salaries`.
///
/// ```text
/// GET    /              -> list (admin)
/// POST   /              -> create (admin, multipart)
/// GET    /teacher/{id}  -> list_for_teacher (owner or admin)
/// PUT    /{id}          -> update (admin, multipart)
/// DELETE /{id}          -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(salaries::list).post(salaries::create))
        .route("/teacher/{id}", get(salaries::list_for_teacher))
        .route(
            "/{id}",
            axum::routing::put(salaries::update).delete(salaries::delete),
        )
}
