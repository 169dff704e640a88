//! Repository for the `salaries` table.

use sqlx::PgPool;

use campus_core::types::DbId;

use crate::models::salary::{CreateSalary, Salary, UpdateSalary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, teacher_id, month, amount, status, slip_file, \
                        created_at, updated_at";

/// Provides CRUD operations for salary records.
pub struct SalaryRepo;

impl SalaryRepo {
    /// Insert a new salary record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSalary) -> Result<Salary, sqlx::Error> {
        let query = format!(
            "INSERT INTO salaries (teacher_id, month, amount, status, slip_file)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Salary>(&query)
            .bind(input.teacher_id)
            .bind(&input.month)
            .bind(input.amount)
            .bind(&input.status)
            .bind(&input.slip_file)
            .fetch_one(pool)
            .await
    }

    /// Find a salary record by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Salary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM salaries WHERE id = $1");
        sqlx::query_as::<_, Salary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all salary records, most recent month first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Salary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM salaries ORDER BY month DESC, id ASC");
        sqlx::query_as::<_, Salary>(&query).fetch_all(pool).await
    }

    /// List one teacher's salary records, most recent month first.
    pub async fn list_for_teacher(
        pool: &PgPool,
        teacher_id: DbId,
    ) -> Result<Vec<Salary>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM salaries WHERE teacher_id = $1 ORDER BY month DESC");
        sqlx::query_as::<_, Salary>(&query)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }

    /// Update a salary record. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSalary,
    ) -> Result<Option<Salary>, sqlx::Error> {
        let query = format!(
            "UPDATE salaries SET
                month = COALESCE($2, month),
                amount = COALESCE($3, amount),
                status = COALESCE($4, status),
                slip_file = COALESCE($5, slip_file)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Salary>(&query)
            .bind(id)
            .bind(&input.month)
            .bind(input.amount)
            .bind(&input.status)
            .bind(&input.slip_file)
            .fetch_optional(pool)
            .await
    }

    /// Delete a salary record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM salaries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
