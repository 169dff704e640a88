//! Handlers for the `/materials` resource (study materials).
//!
//! Any authenticated user may browse; staff publish and remove entries.
//! Creation accepts multipart form data with an optional document.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::material::{CreateMaterial, Material};
use campus_db::repositories::MaterialRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/materials
///
/// List study materials for any authenticated user.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Material>>>> {
    let rows = MaterialRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/materials
///
/// Publish a study material. Staff only. Multipart fields: `title`
/// (required), `description`, `file` (optional document).
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Material>>)> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "description" => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "file" => {
                let filename = field.file_name().unwrap_or("material").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some((filename, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("Title is required".into())))?;

    let file_name = match file_data {
        Some((original, data)) => Some(state.documents.save(&original, &data).await?),
        None => None,
    };

    let create = CreateMaterial {
        title,
        description,
        file_name,
        uploaded_by: Some(staff.user_id),
    };

    let row = MaterialRepo::create(&state.pool, &create).await?;

    tracing::info!(material_id = row.id, uploaded_by = staff.user_id, "Material published");

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// DELETE /api/v1/materials/{id}
///
/// Remove a study material. Staff only. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MaterialRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))
    }
}
