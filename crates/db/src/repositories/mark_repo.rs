//! Repository for the `marks` table.

use sqlx::PgPool;

use campus_core::types::DbId;

use crate::models::mark::{CreateMark, Mark, UpdateMark};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, subject, test_no, marks, total_marks, \
                        created_at, updated_at";

/// Provides CRUD operations for marks.
pub struct MarkRepo;

impl MarkRepo {
    /// Insert a new marks row, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMark) -> Result<Mark, sqlx::Error> {
        let query = format!(
            "INSERT INTO marks (student_id, subject, test_no, marks, total_marks)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mark>(&query)
            .bind(input.student_id)
            .bind(&input.subject)
            .bind(input.test_no)
            .bind(input.marks)
            .bind(input.total_marks)
            .fetch_one(pool)
            .await
    }

    /// Find a marks row by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mark>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marks WHERE id = $1");
        sqlx::query_as::<_, Mark>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all marks ordered by subject then test number.
    pub async fn list(pool: &PgPool) -> Result<Vec<Mark>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marks ORDER BY subject ASC, test_no ASC");
        sqlx::query_as::<_, Mark>(&query).fetch_all(pool).await
    }

    /// List one student's marks ordered by subject then test number.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Mark>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marks WHERE student_id = $1 ORDER BY subject ASC, test_no ASC"
        );
        sqlx::query_as::<_, Mark>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Update a marks row. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMark,
    ) -> Result<Option<Mark>, sqlx::Error> {
        let query = format!(
            "UPDATE marks SET
                subject = COALESCE($2, subject),
                test_no = COALESCE($3, test_no),
                marks = COALESCE($4, marks),
                total_marks = COALESCE($5, total_marks)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mark>(&query)
            .bind(id)
            .bind(&input.subject)
            .bind(input.test_no)
            .bind(input.marks)
            .bind(input.total_marks)
            .fetch_optional(pool)
            .await
    }

    /// Delete a marks row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM marks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
