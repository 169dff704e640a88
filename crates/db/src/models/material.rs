//! Study material entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use campus_core::types::{DbId, Timestamp};

/// A study material row from the `materials` table.
///
/// `file_name` is the stored-document reference returned by the file
/// storage collaborator; `None` for link-only or text-only entries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for publishing a study material.
#[derive(Debug, Deserialize)]
pub struct CreateMaterial {
    pub title: String,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub uploaded_by: Option<DbId>,
}
