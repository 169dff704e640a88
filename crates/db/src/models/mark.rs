//! Marks entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use campus_core::types::{DbId, Timestamp};

/// A marks row from the `marks` table: one student's score in one test.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mark {
    pub id: DbId,
    pub student_id: DbId,
    pub subject: String,
    pub test_no: i32,
    pub marks: i32,
    pub total_marks: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for entering marks.
#[derive(Debug, Deserialize)]
pub struct CreateMark {
    pub student_id: DbId,
    pub subject: String,
    pub test_no: i32,
    pub marks: i32,
    pub total_marks: i32,
}

/// DTO for correcting a marks row.
#[derive(Debug, Deserialize)]
pub struct UpdateMark {
    pub subject: Option<String>,
    pub test_no: Option<i32>,
    pub marks: Option<i32>,
    pub total_marks: Option<i32>,
}
