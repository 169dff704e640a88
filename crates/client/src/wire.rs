//! Wire shapes and the adapter onto canonical types.
//!
//! The backend answers either plain payloads (auth, users) or a
//! `{ "data": ... }` envelope (domain collections), and errors as
//! `{ "error": ..., "code": ... }`. Everything is mapped here, at the
//! boundary, so the rest of the client never branches on wire shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use campus_core::profile::Profile;
use campus_core::roles::Role;
use campus_core::types::{DbId, Timestamp};

use crate::backend::AuthTokens;
use crate::error::ClientError;

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// The `{ "data": T }` envelope used by domain collection responses.
#[derive(Debug, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

/// The `{ "error": ..., "code": ... }` error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
}

/// Successful authentication payload.
#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    pub access_token: String,
    pub refresh_token: String,
    #[allow(dead_code)]
    pub expires_in: i64,
    pub user: Profile,
}

impl From<AuthPayload> for AuthTokens {
    fn from(payload: AuthPayload) -> Self {
        AuthTokens {
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
            profile: payload.user,
        }
    }
}

/// Decode a non-success response into the matching [`ClientError`].
///
/// Stable error codes take precedence; an unreadable body falls back to
/// the HTTP status.
pub(crate) async fn decode_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => match body.code.as_str() {
            "VALIDATION_ERROR" | "BAD_REQUEST" => ClientError::Validation(body.error),
            "UNAUTHORIZED" => ClientError::Unauthorized(body.error),
            "FORBIDDEN" => ClientError::Forbidden(body.error),
            "APPROVAL_PENDING" => ClientError::ApprovalPending,
            "CONFLICT" => ClientError::Conflict(body.error),
            "NOT_FOUND" => ClientError::NotFound(body.error),
            _ => ClientError::Unexpected(format!("{status}: {}", body.error)),
        },
        Err(_) => ClientError::Unexpected(format!("HTTP {status}")),
    }
}

/// Deserialize a success response, or map the failure.
pub(crate) async fn expect_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if response.status().is_success() {
        Ok(response.json::<T>().await?)
    } else {
        Err(decode_error(response).await)
    }
}

/// Check a success status on responses without a useful body.
pub(crate) async fn expect_ok(response: reqwest::Response) -> Result<(), ClientError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(decode_error(response).await)
    }
}

// ---------------------------------------------------------------------------
// Domain records
// ---------------------------------------------------------------------------

/// An attendance row as served by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub user_type: String,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A marks row as served by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkRecord {
    pub id: DbId,
    pub student_id: DbId,
    pub subject: String,
    pub test_no: i32,
    pub marks: i32,
    pub total_marks: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A study material row as served by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialRecord {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A fee row as served by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeRecord {
    pub id: DbId,
    pub student_id: DbId,
    pub amount: i64,
    pub due_date: NaiveDate,
    pub status: String,
    pub challan_file: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A salary row as served by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryRecord {
    pub id: DbId,
    pub teacher_id: DbId,
    pub month: String,
    pub amount: i64,
    pub status: String,
    pub slip_file: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for creating a pre-approved user (admin action).
#[derive(Debug, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Body for replacing a user's editable fields (admin action).
#[derive(Debug, Serialize)]
pub struct UserEdit {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Body for recording attendance.
#[derive(Debug, Serialize)]
pub struct NewAttendance {
    pub user_id: DbId,
    pub user_type: String,
    pub date: NaiveDate,
    pub status: String,
}

/// Body for correcting attendance.
#[derive(Debug, Default, Serialize)]
pub struct AttendanceEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body for entering marks.
#[derive(Debug, Serialize)]
pub struct NewMark {
    pub student_id: DbId,
    pub subject: String,
    pub test_no: i32,
    pub marks: i32,
    pub total_marks: i32,
}

/// Body for correcting marks.
#[derive(Debug, Default, Serialize)]
pub struct MarkEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_no: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<i32>,
}

/// An uploaded document: original file name and contents.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Multipart submission for a fee record.
#[derive(Debug, Default)]
pub struct FeeSubmission {
    pub student_id: Option<DbId>,
    pub amount: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub challan: Option<Upload>,
}

/// Multipart submission for a salary record.
#[derive(Debug, Default)]
pub struct SalarySubmission {
    pub teacher_id: Option<DbId>,
    pub month: Option<String>,
    pub amount: Option<i64>,
    pub status: Option<String>,
    pub slip: Option<Upload>,
}

/// Multipart submission for a study material.
#[derive(Debug, Default)]
pub struct MaterialSubmission {
    pub title: String,
    pub description: Option<String>,
    pub file: Option<Upload>,
}
