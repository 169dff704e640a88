//! Handlers for the `/marks` resource.
//!
//! Students see their own marks; staff (Teacher/Admin/SuperAdmin) see all
//! and may enter, correct, and delete them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_db::models::mark::{CreateMark, Mark, UpdateMark};
use campus_db::repositories::MarkRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::ensure_user_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/marks
///
/// Staff see all marks; students see only their own.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Mark>>>> {
    let rows = if auth.role == Role::Student {
        MarkRepo::list_for_student(&state.pool, auth.user_id).await?
    } else {
        MarkRepo::list(&state.pool).await?
    };
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/marks
///
/// Enter marks for a student. Staff only.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateMark>,
) -> AppResult<(StatusCode, Json<DataResponse<Mark>>)> {
    validate_scores(input.marks, input.total_marks)?;

    let student = ensure_user_exists(&state.pool, input.student_id).await?;
    if student.assigned_role() != Some(Role::Student) {
        return Err(AppError::Core(CoreError::Validation(
            "Marks can only be recorded for students".into(),
        )));
    }

    let row = MarkRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/marks/{id}
///
/// Correct a marks row. Staff only.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMark>,
) -> AppResult<Json<DataResponse<Mark>>> {
    let existing = MarkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Mark", id }))?;

    // Validate against the effective values so a partial update cannot
    // push marks past the total.
    let marks = input.marks.unwrap_or(existing.marks);
    let total = input.total_marks.unwrap_or(existing.total_marks);
    validate_scores(marks, total)?;

    let row = MarkRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Mark", id }))?;
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/marks/{id}
///
/// Remove a marks row. Staff only. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MarkRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Mark", id }))
    }
}

fn validate_scores(marks: i32, total_marks: i32) -> AppResult<()> {
    if total_marks <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Total marks must be positive".into(),
        )));
    }
    if marks < 0 || marks > total_marks {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Marks must be between 0 and {total_marks}"
        ))));
    }
    Ok(())
}
