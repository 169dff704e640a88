//! Repository for the `fees` table.

use sqlx::PgPool;

use campus_core::types::DbId;

use crate::models::fee::{CreateFee, Fee, UpdateFee};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, amount, due_date, status, challan_file, \
                        created_at, updated_at";

/// Provides CRUD operations for fee records.
pub struct FeeRepo;

impl FeeRepo {
    /// Insert a new fee record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFee) -> Result<Fee, sqlx::Error> {
        let query = format!(
            "INSERT INTO fees (student_id, amount, due_date, status, challan_file)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(input.student_id)
            .bind(input.amount)
            .bind(input.due_date)
            .bind(&input.status)
            .bind(&input.challan_file)
            .fetch_one(pool)
            .await
    }

    /// Find a fee record by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fees WHERE id = $1");
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all fee records, nearest due date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fees ORDER BY due_date ASC, id ASC");
        sqlx::query_as::<_, Fee>(&query).fetch_all(pool).await
    }

    /// List one student's fee records, nearest due date first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Fee>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM fees WHERE student_id = $1 ORDER BY due_date ASC");
        sqlx::query_as::<_, Fee>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Update a fee record. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFee,
    ) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!(
            "UPDATE fees SET
                amount = COALESCE($2, amount),
                due_date = COALESCE($3, due_date),
                status = COALESCE($4, status),
                challan_file = COALESCE($5, challan_file)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .bind(input.amount)
            .bind(input.due_date)
            .bind(&input.status)
            .bind(&input.challan_file)
            .fetch_optional(pool)
            .await
    }

    /// Delete a fee record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
