//! Fee entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use campus_core::types::{DbId, Timestamp};

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_PAID: &str = "Paid";

/// All valid fee/salary payment status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_PAID];

/// A fee row from the `fees` table.
///
/// `challan_file` is the stored-document reference of the uploaded fee
/// challan, if one was attached. Amounts are whole currency units.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fee {
    pub id: DbId,
    pub student_id: DbId,
    pub amount: i64,
    pub due_date: NaiveDate,
    pub status: String,
    pub challan_file: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a fee record.
#[derive(Debug, Deserialize)]
pub struct CreateFee {
    pub student_id: DbId,
    pub amount: i64,
    pub due_date: NaiveDate,
    pub status: String,
    pub challan_file: Option<String>,
}

/// DTO for updating a fee record.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFee {
    pub amount: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub challan_file: Option<String>,
}

/// Validate that a payment status string is one of the accepted values.
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
