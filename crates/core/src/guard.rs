//! The access guard.
//!
//! A pure decision function over the current session and a view's declared
//! capability requirement. It performs no I/O and must be re-evaluated on
//! every navigation and on every session-state change.

use crate::roles::Role;
use crate::session::Session;

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the requested view.
    Granted,
    /// Redirect to the login view.
    Denied,
}

/// Decide whether a view guarded by `required` may render for `session`.
///
/// Rules:
/// - no session (no user / no token) denies;
/// - a non-empty `required` set denies unless the session's assigned role
///   is a member — an unapproved user has `role = None` and therefore
///   fails every non-empty requirement, valid token or not;
/// - an empty `required` set means "any authenticated user".
pub fn allow(session: Option<&Session>, required: &[Role]) -> bool {
    let Some(session) = session else {
        return false;
    };
    if session.token.is_empty() {
        return false;
    }
    if required.is_empty() {
        return true;
    }
    match session.profile.role {
        Some(role) => required.contains(&role),
        None => false,
    }
}

/// [`allow`] expressed as an [`Access`] outcome.
pub fn decide(session: Option<&Session>, required: &[Role]) -> Access {
    if allow(session, required) {
        Access::Granted
    } else {
        Access::Denied
    }
}
