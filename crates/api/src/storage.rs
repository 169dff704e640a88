//! Local document store for uploaded files (challans, salary slips,
//! study materials).
//!
//! Files are written under a configured root directory with a UUID prefix
//! so original names never collide. The stored name is the reference
//! handed back to callers and persisted on the owning row.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use campus_core::error::CoreError;

/// Filesystem-backed document store.
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Save a document, returning its stored reference name.
    ///
    /// The reference is `<uuid>_<sanitized original name>`.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String, CoreError> {
        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_file_name(original_name));
        let path = self.root.join(&stored_name);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to store document: {e}")))?;
        tracing::debug!(name = %stored_name, bytes = data.len(), "Stored document");
        Ok(stored_name)
    }

    /// Read a stored document back by its reference name.
    ///
    /// Returns `Validation` for names that escape the storage root and
    /// `None` when the reference does not exist.
    pub async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, CoreError> {
        let path = self.resolve(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::Internal(format!(
                "Failed to read document: {e}"
            ))),
        }
    }

    /// Resolve a reference name to a path inside the root, rejecting
    /// separators and parent components.
    fn resolve(&self, name: &str) -> Result<PathBuf, CoreError> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || Path::new(name)
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(CoreError::Validation(format!(
                "Invalid document reference: {name}"
            )));
        }
        Ok(self.root.join(name))
    }
}

/// Keep alphanumerics, dots, dashes, and underscores; replace the rest.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path()).unwrap();

        let name = store.save("challan march.pdf", b"PDF-bytes").await.unwrap();
        assert!(name.ends_with("challan_march.pdf"));

        let bytes = store.read(&name).await.unwrap().expect("document exists");
        assert_eq!(bytes, b"PDF-bytes");
    }

    #[tokio::test]
    async fn test_missing_document_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path()).unwrap();
        assert!(store.read("nope.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path()).unwrap();

        for name in ["../etc/passwd", "a/b.pdf", "..", ""] {
            assert!(store.read(name).await.is_err(), "{name} must be rejected");
        }
    }
}
