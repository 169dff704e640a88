//! Domain error taxonomy.
//!
//! Every fallible operation in the workspace bottoms out in one of these
//! variants. The API layer maps them to HTTP statuses and stable error
//! codes; the client maps the codes back so both sides agree on meaning.

use crate::types::DbId;

/// Domain-level error shared across the workspace.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    /// Missing or malformed input, detected before any side effect.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials are missing, invalid, or expired.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks the privilege for the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Credentials are valid but the account has not been approved yet.
    ///
    /// Distinct from [`CoreError::Unauthorized`] so callers can render an
    /// "awaiting approval" message instead of "invalid credentials".
    #[error("Account is awaiting approval")]
    ApprovalPending,

    /// A uniqueness rule was violated (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The referenced record does not exist (or is not in a usable state).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// An unexpected internal failure. The message is for logs, not users.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "User",
            id: 7,
        };
        assert_eq!(err.to_string(), "User with id 7 not found");
    }

    #[test]
    fn test_approval_pending_has_user_facing_message() {
        assert_eq!(
            CoreError::ApprovalPending.to_string(),
            "Account is awaiting approval"
        );
    }
}
