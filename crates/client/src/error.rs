//! Client-side error taxonomy.
//!
//! Mirrors the server's stable error codes so callers can branch on
//! meaning (notably the awaiting-approval case) without string matching.

/// Errors surfaced by client operations.
///
/// Every backend-call failure lands here and is reported to the user;
/// nothing crashes the application. The one sanctioned silent path is
/// best-effort logout invalidation, which logs and proceeds.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// Missing or malformed input, rejected before or by the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad credentials, or a missing/expired token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed to perform the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Credentials are valid but the account awaits approval. Rendered
    /// differently from [`ClientError::Unauthorized`].
    #[error("Account is awaiting approval")]
    ApprovalPending,

    /// A uniqueness rule was violated (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request never completed (connection refused, timeout, ...).
    /// Surfaced to the user for a manual retry.
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with something we could not interpret.
    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Unexpected(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
