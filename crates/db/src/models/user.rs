//! User entity model and DTOs.

use std::str::FromStr;

use sqlx::FromRow;

use campus_core::error::CoreError;
use campus_core::profile::Profile;
use campus_core::roles::Role;
use campus_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Convert to [`Profile`] via [`User::to_profile`] for external output.
///
/// `role` is NULL until the account is approved; the
/// `ck_users_role_approved` constraint keeps `role`/`approved` in lockstep.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Option<String>,
    pub pending_role: String,
    pub approved: bool,
    pub roll_no: Option<String>,
    pub department: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Map this row onto the canonical [`Profile`] shape.
    ///
    /// Role columns only ever hold seeded names, so a parse failure means
    /// the row was corrupted out-of-band and surfaces as `Internal`.
    pub fn to_profile(&self) -> Result<Profile, CoreError> {
        let role = self
            .role
            .as_deref()
            .map(Role::from_str)
            .transpose()
            .map_err(|e| CoreError::Internal(format!("Corrupt role column: {e}")))?;
        let pending_role = Role::from_str(&self.pending_role)
            .map_err(|e| CoreError::Internal(format!("Corrupt pending_role column: {e}")))?;

        Ok(Profile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role,
            pending_role,
            approved: self.approved,
            roll_no: self.roll_no.clone(),
            department: self.department.clone(),
            created_at: self.created_at,
        })
    }

    /// The assigned role, parsed. `None` while unapproved.
    pub fn assigned_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| Role::from_str(r).ok())
    }
}

/// DTO for creating a user through self-registration: unapproved, no role.
#[derive(Debug)]
pub struct CreateRegistration {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub pending_role: Role,
    pub roll_no: Option<String>,
    pub department: Option<String>,
}

/// DTO for an admin creating a pre-approved user directly.
#[derive(Debug)]
pub struct CreateApprovedUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub roll_no: Option<String>,
    pub department: Option<String>,
}

/// DTO for replacing an approved user's editable fields (PUT semantics).
///
/// Role changes here are edits performed by an authorized admin, not
/// re-approval. `roll_no`/`department` carry the value appropriate for the
/// new role (`None` clears the column).
#[derive(Debug)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub roll_no: Option<String>,
    pub department: Option<String>,
}
