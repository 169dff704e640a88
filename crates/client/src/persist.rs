//! Persisted client-side credentials.
//!
//! The analogue of the browser's local storage: a token pair stored under
//! fixed key names, read back on startup by session restore.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// The persisted token pair. Field names are the fixed storage keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    pub refresh_token: String,
}

/// Durable storage for the credential pair.
pub trait CredentialStore: Send + Sync {
    /// Read back previously saved credentials, if any.
    fn load(&self) -> Option<StoredCredentials>;

    /// Persist the credential pair, replacing any previous one.
    fn save(&self, credentials: &StoredCredentials) -> std::io::Result<()>;

    /// Remove any persisted credentials.
    fn clear(&self) -> std::io::Result<()>;
}

/// File-backed credential store (one small JSON document).
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store credentials at `path`. Parent directories are created on save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<StoredCredentials> {
        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(creds) => Some(creds),
            Err(e) => {
                // A corrupt file reads as "no stored session".
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable credential file");
                None
            }
        }
    }

    fn save(&self, credentials: &StoredCredentials) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(credentials)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, bytes)
    }

    fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory credential store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<StoredCredentials>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<StoredCredentials> {
        self.inner.lock().expect("credential lock poisoned").clone()
    }

    fn save(&self, credentials: &StoredCredentials) -> std::io::Result<()> {
        *self.inner.lock().expect("credential lock poisoned") = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        *self.inner.lock().expect("credential lock poisoned") = None;
        Ok(())
    }
}
