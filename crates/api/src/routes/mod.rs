pub mod attendance;
pub mod auth;
pub mod fees;
pub mod files;
pub mod health;
pub mod marks;
pub mod materials;
pub mod salaries;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/refresh                  refresh (public)
/// /auth/me                       current profile (requires auth)
/// /auth/logout                   logout (requires auth)
///
/// /users                         list, create (admin only)
/// /users/pending                 pending registrations (admin only)
/// /users/{id}                    get, update, delete (admin only)
/// /users/{id}/approve            approve registration (admin only)
///
/// /attendance                    list (scoped), create (admin)
/// /attendance/{id}               update, delete (admin)
///
/// /marks                         list (scoped), create (staff)
/// /marks/{id}                    update, delete (staff)
///
/// /materials                     list (any authed), create (staff)
/// /materials/{id}                delete (staff)
///
/// /fees                          list (admin), create (admin, multipart)
/// /fees/student/{id}             student's fees (owner or admin)
/// /fees/{id}                     update, delete (admin)
///
/// /salaries                      list (admin), create (admin, multipart)
/// /salaries/teacher/{id}         teacher's salaries (owner or admin)
/// /salaries/{id}                 update, delete (admin)
///
/// /files/{name}                  download stored document (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication + registration (approval workflow entry point).
        .nest("/auth", auth::router())
        // User management and approvals.
        .nest("/users", users::router())
        // Domain collections.
        .nest("/attendance", attendance::router())
        .nest("/marks", marks::router())
        .nest("/materials", materials::router())
        .nest("/fees", fees::router())
        .nest("/salaries", salaries::router())
        // Stored document downloads.
        .nest("/files", files::router())
}
