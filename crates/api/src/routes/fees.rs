//! Route definitions for the `/fees` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::fees;
use crate::state::AppState;

/// Routes mounted at `/fees`.
///
/// ```text
/// GET    /              -> list (admin)
/// POST   /              -> create (admin, multipart)
/// GET    /student/{id}  -> list_for_student (owner or admin)
/// PUT    /{id}          -> update (admin, multipart)
/// DELETE /{id}          -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fees::list).post(fees::create))
        .route("/student/{id}", get(fees::list_for_student))
        .route(
            "/{id}",
            axum::routing::put(fees::update).delete(fees::delete),
        )
}
