//! Salary entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use campus_core::types::{DbId, Timestamp};

/// A salary row from the `salaries` table.
///
/// `month` is a `YYYY-MM` label matching the original payroll forms.
/// `slip_file` is the stored-document reference of the uploaded salary
/// slip, if one was attached.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Salary {
    pub id: DbId,
    pub teacher_id: DbId,
    pub month: String,
    pub amount: i64,
    pub status: String,
    pub slip_file: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a salary record.
#[derive(Debug, Deserialize)]
pub struct CreateSalary {
    pub teacher_id: DbId,
    pub month: String,
    pub amount: i64,
    pub status: String,
    pub slip_file: Option<String>,
}

/// DTO for updating a salary record.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSalary {
    pub month: Option<String>,
    pub amount: Option<i64>,
    pub status: Option<String>,
    pub slip_file: Option<String>,
}

/// Validate a `YYYY-MM` month label.
pub fn validate_month(month: &str) -> Result<(), String> {
    let valid = chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_ok()
        && month.len() == 7;
    if valid {
        Ok(())
    } else {
        Err(format!("Invalid month '{month}'. Expected YYYY-MM"))
    }
}
