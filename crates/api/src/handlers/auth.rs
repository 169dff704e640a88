//! Handlers for the `/auth` resource (register, login, refresh, me, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use campus_core::error::CoreError;
use campus_core::profile::Profile;
use campus_core::registration::RegistrationRequest;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_db::models::session::CreateSession;
use campus_db::models::user::{CreateRegistration, User};
use campus_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: Profile,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Public self-registration. Creates an unapproved user with no assigned
/// role; the requested role is kept in `pending_role` until an admin
/// approves it. No token is issued.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegistrationRequest>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    // Validate before touching the database; a failed registration must
    // leave no row behind.
    input.validate()?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Email {} is already registered",
            input.email
        ))));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // Only the attribute matching the requested role is kept.
    let create = CreateRegistration {
        name: input.name.trim().to_string(),
        email: input.email.clone(),
        password_hash: hashed,
        pending_role: input.pending_role,
        roll_no: match input.pending_role {
            Role::Student => input.roll_no.clone(),
            _ => None,
        },
        department: match input.pending_role {
            Role::Teacher => input.department.clone(),
            _ => None,
        },
    };

    let user = UserRepo::create_registration(&state.pool, &create).await?;
    let profile = user.to_profile().map_err(AppError::Core)?;

    tracing::info!(
        user_id = user.id,
        pending_role = %profile.pending_role,
        "Registration created, awaiting approval"
    );

    Ok((StatusCode::CREATED, Json(profile)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
///
/// An account whose password verifies but is not yet approved gets a 403
/// `APPROVAL_PENDING` response -- deliberately distinct from the 401
/// returned for bad credentials -- and no token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find user by email.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // 3. Credentials are good; an unapproved account still gets no token.
    if !user.approved {
        return Err(AppError::Core(CoreError::ApprovalPending));
    }

    let role = user.assigned_role().ok_or_else(|| {
        AppError::Core(CoreError::Internal(format!(
            "Approved user {} has no role",
            user.id
        )))
    })?;

    // 4. On success: stamp last_login_at.
    UserRepo::record_successful_login(&state.pool, user.id).await?;

    // 5. Generate tokens and create session.
    let response = create_auth_response(&state, &user, role).await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token.
    let token_hash = hash_refresh_token(&input.refresh_token);

    // 2. Find matching active session.
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 3. Revoke old session (token rotation).
    SessionRepo::revoke(&state.pool, session.id).await?;

    // 4. Find user; approval may have been revoked since the last login.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.approved {
        return Err(AppError::Core(CoreError::ApprovalPending));
    }

    let role = user.assigned_role().ok_or_else(|| {
        AppError::Core(CoreError::Internal(format!(
            "Approved user {} has no role",
            user.id
        )))
    })?;

    // 5. Generate new tokens and create new session.
    let response = create_auth_response(&state, &user, role).await?;

    Ok(Json(response))
}

/// GET /api/v1/auth/me
///
/// Return the profile for the current token. Powers client session
/// restoration on startup.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Profile>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let profile = user.to_profile().map_err(AppError::Core)?;
    Ok(Json(profile))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the
/// response.
async fn create_auth_response(
    state: &AppState,
    user: &User,
    role: Role,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    let profile = user.to_profile().map_err(AppError::Core)?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: profile,
    })
}

/// Verify that a user id exists, returning the row.
pub(crate) async fn ensure_user_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<User> {
    UserRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}
