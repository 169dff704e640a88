//! Attendance entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use campus_core::types::{DbId, Timestamp};

/// Attendance status for one person on one day.
pub const STATUS_PRESENT: &str = "Present";
pub const STATUS_ABSENT: &str = "Absent";

/// All valid attendance status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PRESENT, STATUS_ABSENT];

/// An attendance row from the `attendance` table.
///
/// `user_type` records whether the row tracks a Student or a Teacher;
/// attendance is kept for both populations.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub user_id: DbId,
    pub user_type: String,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording attendance.
#[derive(Debug, Deserialize)]
pub struct CreateAttendance {
    pub user_id: DbId,
    pub user_type: String,
    pub date: NaiveDate,
    pub status: String,
}

/// DTO for correcting an attendance row.
#[derive(Debug, Deserialize)]
pub struct UpdateAttendance {
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}
