//! Handlers for the `/fees` resource.
//!
//! Fee records are managed by Admin/SuperAdmin through multipart forms
//! that may attach a challan document. Students read their own records.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;

use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_db::models::fee::{self, CreateFee, Fee, UpdateFee};
use campus_db::repositories::FeeRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::ensure_user_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/fees
///
/// List all fee records. Admin only.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<Fee>>>> {
    let rows = FeeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/fees/student/{id}
///
/// List one student's fee records. A student may read only their own;
/// Admin/SuperAdmin may read anyone's.
pub async fn list_for_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Fee>>>> {
    let own = auth.role == Role::Student && auth.user_id == student_id;
    if !own && !auth.role.is_staff_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only view your own fees".into(),
        )));
    }

    let rows = FeeRepo::list_for_student(&state.pool, student_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/fees
///
/// Create a fee record. Admin only. Multipart fields: `student_id`,
/// `amount`, `due_date` (YYYY-MM-DD), `status`, `file` (optional challan).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Fee>>)> {
    let form = FeeForm::parse(&state, multipart).await?;

    let student_id = form
        .student_id
        .ok_or_else(|| AppError::Core(CoreError::Validation("student_id is required".into())))?;
    let amount = form
        .amount
        .ok_or_else(|| AppError::Core(CoreError::Validation("amount is required".into())))?;
    let due_date = form
        .due_date
        .ok_or_else(|| AppError::Core(CoreError::Validation("due_date is required".into())))?;
    let status = form.status.unwrap_or_else(|| fee::STATUS_PENDING.to_string());

    fee::validate_status(&status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if amount <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Amount must be positive".into(),
        )));
    }

    let student = ensure_user_exists(&state.pool, student_id).await?;
    if student.assigned_role() != Some(Role::Student) {
        return Err(AppError::Core(CoreError::Validation(
            "Fees can only be charged to students".into(),
        )));
    }

    let create = CreateFee {
        student_id,
        amount,
        due_date,
        status,
        challan_file: form.challan_file,
    };

    let row = FeeRepo::create(&state.pool, &create).await?;

    tracing::info!(fee_id = row.id, student_id, created_by = admin.user_id, "Fee created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/fees/{id}
///
/// Update a fee record. Admin only. Accepts the same multipart fields as
/// create; absent fields are left unchanged, and a new `file` replaces
/// the challan reference.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Fee>>> {
    let form = FeeForm::parse(&state, multipart).await?;

    if let Some(status) = &form.status {
        fee::validate_status(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if matches!(form.amount, Some(a) if a <= 0) {
        return Err(AppError::Core(CoreError::Validation(
            "Amount must be positive".into(),
        )));
    }

    let update = UpdateFee {
        amount: form.amount,
        due_date: form.due_date,
        status: form.status,
        challan_file: form.challan_file,
    };

    let row = FeeRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Fee", id }))?;
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/fees/{id}
///
/// Remove a fee record. Admin only. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FeeRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Fee", id }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parsed multipart form for fee create/update. Any attached `file` is
/// stored immediately and carried as its reference.
struct FeeForm {
    student_id: Option<DbId>,
    amount: Option<i64>,
    due_date: Option<NaiveDate>,
    status: Option<String>,
    challan_file: Option<String>,
}

impl FeeForm {
    async fn parse(state: &AppState, mut multipart: Multipart) -> AppResult<Self> {
        let mut form = FeeForm {
            student_id: None,
            amount: None,
            due_date: None,
            status: None,
            challan_file: None,
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "student_id" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.student_id = Some(parse_field(&name, &text)?);
                }
                "amount" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.amount = Some(parse_field(&name, &text)?);
                }
                "due_date" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.due_date = Some(
                        NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|_| {
                            AppError::Core(CoreError::Validation(format!(
                                "Invalid due_date '{text}'. Expected YYYY-MM-DD"
                            )))
                        })?,
                    );
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
                    let filename = field.file_name().unwrap_or("challan").to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.challan_file = Some(state.documents.save(&filename, &data).await?);
                }
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }
}

/// Parse a numeric multipart text field, naming it in the error.
fn parse_field<T: std::str::FromStr>(name: &str, text: &str) -> AppResult<T> {
    text.trim().parse().map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "Invalid value '{text}' for {name}"
        )))
    })
}
