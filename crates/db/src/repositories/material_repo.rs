//! Repository for the `materials` table.

use sqlx::PgPool;

use campus_core::types::DbId;

use crate::models::material::{CreateMaterial, Material};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, file_name, uploaded_by, created_at, updated_at";

/// Provides CRUD operations for study materials.
pub struct MaterialRepo;

impl MaterialRepo {
    /// Insert a new material, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMaterial) -> Result<Material, sqlx::Error> {
        let query = format!(
            "INSERT INTO materials (title, description, file_name, uploaded_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.file_name)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// Find a material by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials WHERE id = $1");
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all materials, most recently published first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials ORDER BY created_at DESC");
        sqlx::query_as::<_, Material>(&query).fetch_all(pool).await
    }

    /// Delete a material. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
