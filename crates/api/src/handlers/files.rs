//! Handler for the `/files` resource: downloading stored documents
//! (challans, salary slips, study materials) by their reference name.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/files/{name}
///
/// Stream a stored document back by its reference name. Requires
/// authentication; references are unguessable (UUID-prefixed).
pub async fn download(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let bytes = state
        .documents
        .read(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document '{name}' not found")))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    // The stored name is already sanitized to ASCII at upload time.
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{name}\"")) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((headers, bytes))
}
