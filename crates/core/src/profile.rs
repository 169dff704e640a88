//! The canonical user profile record.
//!
//! Both backend integrations are adapted onto this one shape at the
//! boundary (see `campus-client`); internal logic never branches on what
//! the wire looked like.

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::{DbId, Timestamp};

/// A user's identity and authorization record, minus credentials.
///
/// Invariant: `role` is `None` exactly while `approved` is `false`. Once
/// approved, `role` is set and `pending_role` is informational only — the
/// capability set derives solely from `role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub pending_role: Role,
    pub approved: bool,
    /// Set when `role`/`pending_role` is Student.
    pub roll_no: Option<String>,
    /// Set when `role`/`pending_role` is Teacher.
    pub department: Option<String>,
    pub created_at: Timestamp,
}

impl Profile {
    /// Check the approval invariant: unapproved users have no role, and
    /// approved users always have one.
    pub fn invariant_holds(&self) -> bool {
        self.approved == self.role.is_some()
    }
}
