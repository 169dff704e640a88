//! Handlers for the `/salaries` resource.
//!
//! Salary records are managed by Admin/SuperAdmin through multipart forms
//! that may attach a salary-slip document. Teachers read their own records.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_db::models::fee;
use campus_db::models::salary::{self, CreateSalary, Salary, UpdateSalary};
use campus_db::repositories::SalaryRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::ensure_user_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/salaries
///
/// List all salary records. Admin only.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<Salary>>>> {
    let rows = SalaryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/salaries/teacher/{id}
///
/// List one teacher's salary records. A teacher may read only their own;
/// Admin/SuperAdmin may read anyone's.
pub async fn list_for_teacher(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(teacher_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Salary>>>> {
    let own = auth.role == Role::Teacher && auth.user_id == teacher_id;
    if !own && !auth.role.is_staff_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only view your own salaries".into(),
        )));
    }

    let rows = SalaryRepo::list_for_teacher(&state.pool, teacher_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/salaries
///
/// Create a salary record. Admin only. Multipart fields: `teacher_id`,
/// `month` (YYYY-MM), `amount`, `status`, `file` (optional slip).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Salary>>)> {
    let form = SalaryForm::parse(&state, multipart).await?;

    let teacher_id = form
        .teacher_id
        .ok_or_else(|| AppError::Core(CoreError::Validation("teacher_id is required".into())))?;
    let month = form
        .month
        .ok_or_else(|| AppError::Core(CoreError::Validation("month is required".into())))?;
    let amount = form
        .amount
        .ok_or_else(|| AppError::Core(CoreError::Validation("amount is required".into())))?;
    let status = form.status.unwrap_or_else(|| fee::STATUS_PENDING.to_string());

    salary::validate_month(&month).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    fee::validate_status(&status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if amount <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Amount must be positive".into(),
        )));
    }

    let teacher = ensure_user_exists(&state.pool, teacher_id).await?;
    if teacher.assigned_role() != Some(Role::Teacher) {
        return Err(AppError::Core(CoreError::Validation(
            "Salaries can only be paid to teachers".into(),
        )));
    }

    let create = CreateSalary {
        teacher_id,
        month,
        amount,
        status,
        slip_file: form.slip_file,
    };

    let row = SalaryRepo::create(&state.pool, &create).await?;

    tracing::info!(
        salary_id = row.id,
        teacher_id,
        created_by = admin.user_id,
        "Salary created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/salaries/{id}
///
/// Update a salary record. Admin only. Accepts the same multipart fields
/// as create; absent fields are left unchanged, and a new `file` replaces
/// the slip reference.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Salary>>> {
    let form = SalaryForm::parse(&state, multipart).await?;

    if let Some(month) = &form.month {
        salary::validate_month(month).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(status) = &form.status {
        fee::validate_status(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if matches!(form.amount, Some(a) if a <= 0) {
        return Err(AppError::Core(CoreError::Validation(
            "Amount must be positive".into(),
        )));
    }

    let update = UpdateSalary {
        month: form.month,
        amount: form.amount,
        status: form.status,
        slip_file: form.slip_file,
    };

    let row = SalaryRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Salary",
            id,
        }))?;
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/salaries/{id}
///
/// Remove a salary record. Admin only. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SalaryRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Salary",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parsed multipart form for salary create/update. Any attached `file` is
/// stored immediately and carried as its reference.
struct SalaryForm {
    teacher_id: Option<DbId>,
    month: Option<String>,
    amount: Option<i64>,
    status: Option<String>,
    slip_file: Option<String>,
}

impl SalaryForm {
    async fn parse(state: &AppState, mut multipart: Multipart) -> AppResult<Self> {
        let mut form = SalaryForm {
            teacher_id: None,
            month: None,
            amount: None,
            status: None,
            slip_file: None,
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "teacher_id" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.teacher_id = Some(text.trim().parse().map_err(|_| {
                        AppError::Core(CoreError::Validation(format!(
                            "Invalid value '{text}' for teacher_id"
                        )))
                    })?);
                }
                "month" => {
                    form.month = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(e.to_string()))?,
                    );
                }
                "amount" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.amount = Some(text.trim().parse().map_err(|_| {
                        AppError::Core(CoreError::Validation(format!(
                            "Invalid value '{text}' for amount"
                        )))
                    })?);
                }
                "status" => {
                    form.status = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(e.to_string()))?,
                    );
                }
                "file" => {
                    let filename = field.file_name().unwrap_or("slip").to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.slip_file = Some(state.documents.save(&filename, &data).await?);
                }
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }
}
