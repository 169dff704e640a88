//! Repository for the `attendance` table.

use sqlx::PgPool;

use campus_core::types::DbId;

use crate::models::attendance::{Attendance, CreateAttendance, UpdateAttendance};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, user_type, date, status, created_at, updated_at";

/// Provides CRUD operations for attendance records.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Insert a new attendance record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAttendance,
    ) -> Result<Attendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance (user_id, user_type, date, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(input.user_id)
            .bind(&input.user_type)
            .bind(input.date)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find an attendance record by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance WHERE id = $1");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all attendance records, most recent day first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, Attendance>(&query).fetch_all(pool).await
    }

    /// List attendance matching the given optional filters, most recent
    /// day first. A `None` filter matches everything.
    pub async fn list_filtered(
        pool: &PgPool,
        user_id: Option<DbId>,
        user_type: Option<&str>,
        date: Option<chrono::NaiveDate>,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             WHERE ($1::bigint IS NULL OR user_id = $1)
               AND ($2::text IS NULL OR user_type = $2)
               AND ($3::date IS NULL OR date = $3)
             ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(user_id)
            .bind(user_type)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// List attendance for one person, most recent day first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM attendance WHERE user_id = $1 ORDER BY date DESC");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update an attendance record. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAttendance,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance SET
                date = COALESCE($2, date),
                status = COALESCE($3, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .bind(input.date)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an attendance record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
