//! Handlers for the `/users` resource (management + approval workflow).
//!
//! All handlers require the Admin or SuperAdmin role via [`RequireAdmin`].
//! Every role assignment -- approve, create, role edit -- passes through
//! [`check_assignment`], making the privilege table authoritative here
//! rather than a client-side convenience.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use campus_core::approval::check_assignment;
use campus_core::error::CoreError;
use campus_core::profile::Profile;
use campus_core::registration::MIN_PASSWORD_LENGTH;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_db::models::user::{CreateApprovedUser, UpdateUser, User};
use campus_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub roll_no: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub roll_no: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Request body for `POST /users/{id}/approve`.
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Create a pre-approved user directly. The caller must be privileged to
/// assign the requested role (Admin may create Students and Teachers;
/// only SuperAdmin may create Admins or SuperAdmins).
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    check_assignment(Some(admin.role), input.role)?;

    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name and email are required".into(),
        )));
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let (roll_no, department) = role_attributes(input.role, input.roll_no, input.department);

    let create = CreateApprovedUser {
        name: input.name.trim().to_string(),
        email: input.email,
        password_hash: hashed,
        role: input.role,
        roll_no,
        department,
    };

    let user = UserRepo::create_approved(&state.pool, &create).await?;
    let profile = to_profile(&user)?;

    tracing::info!(
        user_id = user.id,
        role = %input.role,
        created_by = admin.user_id,
        "User created"
    );

    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/users
///
/// List all users, approved and pending alike.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Profile>>> {
    let users = UserRepo::list(&state.pool).await?;
    let profiles = users
        .iter()
        .map(to_profile)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(profiles))
}

/// GET /api/v1/users/pending
///
/// List registrations still awaiting approval, oldest first.
pub async fn list_pending(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Profile>>> {
    let users = UserRepo::list_pending(&state.pool).await?;
    let profiles = users
        .iter()
        .map(to_profile)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(profiles))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Profile>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(to_profile(&user)?))
}

/// PUT /api/v1/users/{id}
///
/// Replace an approved user's editable fields. A role change here is an
/// edit by an authorized admin, not re-approval; the caller must dominate
/// both the target's current role and the new one.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<Profile>> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    // Pending registrations have no role to edit; they go through the
    // approve action instead.
    let Some(current_role) = target.assigned_role() else {
        return Err(AppError::Core(CoreError::Validation(
            "User is awaiting approval; use the approve action".into(),
        )));
    };

    check_assignment(Some(admin.role), current_role)?;
    check_assignment(Some(admin.role), input.role)?;

    let (roll_no, department) = role_attributes(input.role, input.roll_no, input.department);

    let update = UpdateUser {
        name: input.name,
        email: input.email,
        role: input.role,
        roll_no,
        department,
    };

    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(to_profile(&user)?))
}

/// DELETE /api/v1/users/{id}
///
/// Remove a user. Self-deletion is rejected, and the caller must dominate
/// the target's role. Returns 204 No Content.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot delete your own account".into(),
        )));
    }

    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if let Some(role) = target.assigned_role() {
        check_assignment(Some(admin.role), role)?;
    }

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// POST /api/v1/users/{id}/approve
///
/// Approve a pending registration, assigning the given role. Only
/// SuperAdmin may assign Admin or SuperAdmin; Admin may assign Student or
/// Teacher. Targets that are missing or already approved yield 404 --
/// re-approval is not a transition that exists.
pub async fn approve_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ApproveRequest>,
) -> AppResult<Json<Profile>> {
    check_assignment(Some(admin.role), input.role)?;

    let user = UserRepo::approve(&state.pool, id, input.role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(
        user_id = id,
        role = %input.role,
        approved_by = admin.user_id,
        "User approved"
    );

    Ok(Json(to_profile(&user)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a row onto the canonical profile shape.
pub(crate) fn to_profile(user: &User) -> AppResult<Profile> {
    user.to_profile().map_err(AppError::Core)
}

/// Keep only the attribute matching the role: roll numbers belong to
/// Students, departments to Teachers.
fn role_attributes(
    role: Role,
    roll_no: Option<String>,
    department: Option<String>,
) -> (Option<String>, Option<String>) {
    match role {
        Role::Student => (roll_no, None),
        Role::Teacher => (None, department),
        Role::Admin | Role::SuperAdmin => (None, None),
    }
}
