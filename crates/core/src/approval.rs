//! Approval workflow rules.
//!
//! A registration moves `PendingApproval(pending_role) -> Approved(role)`
//! exactly once, driven by an Admin or SuperAdmin. There is no transition
//! back: later role changes are ordinary edits, not re-approval.

use crate::error::CoreError;
use crate::roles::Role;

/// Check that a caller may assign `assigned` to another user.
///
/// This is the authoritative privilege check: the API server runs it on
/// every approve/create/role-change, and the client runs the same function
/// as a UX convenience before submitting.
pub fn check_assignment(caller: Option<Role>, assigned: Role) -> Result<(), CoreError> {
    match caller {
        Some(role) if role.can_assign(assigned) => Ok(()),
        _ => Err(CoreError::Forbidden(format!(
            "Insufficient privilege to assign the {assigned} role"
        ))),
    }
}
