//! Handlers for the `/attendance` resource.
//!
//! Students and teachers see only their own rows; Admin/SuperAdmin see
//! everything and may filter. Mutations are admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::attendance::{
    self, Attendance, CreateAttendance, UpdateAttendance,
};
use campus_db::repositories::AttendanceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::ensure_user_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters accepted by the admin listing.
#[derive(Debug, Deserialize)]
pub struct AttendanceFilter {
    pub user_id: Option<DbId>,
    pub user_type: Option<String>,
    pub date: Option<NaiveDate>,
}

/// GET /api/v1/attendance
///
/// Admins see all rows (optionally filtered); everyone else sees their own.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<AttendanceFilter>,
) -> AppResult<Json<DataResponse<Vec<Attendance>>>> {
    let rows = if auth.role.is_staff_admin() {
        AttendanceRepo::list_filtered(
            &state.pool,
            filter.user_id,
            filter.user_type.as_deref(),
            filter.date,
        )
        .await?
    } else {
        AttendanceRepo::list_for_user(&state.pool, auth.user_id).await?
    };
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/attendance
///
/// Record attendance for a user. Admin only.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateAttendance>,
) -> AppResult<(StatusCode, Json<DataResponse<Attendance>>)> {
    attendance::validate_status(&input.status)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if !matches!(input.user_type.as_str(), "Student" | "Teacher") {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid user_type '{}'. Must be Student or Teacher",
            input.user_type
        ))));
    }
    ensure_user_exists(&state.pool, input.user_id).await?;

    let row = AttendanceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/attendance/{id}
///
/// Correct an attendance row. Admin only.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAttendance>,
) -> AppResult<Json<DataResponse<Attendance>>> {
    if let Some(status) = &input.status {
        attendance::validate_status(status)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let row = AttendanceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attendance",
            id,
        }))?;
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/attendance/{id}
///
/// Remove an attendance row. Admin only. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AttendanceRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Attendance",
            id,
        }))
    }
}
