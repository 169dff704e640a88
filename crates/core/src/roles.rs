//! The role enumeration and its privilege relation.
//!
//! Wire and database representations both use the exact PascalCase names
//! (`"Student"`, `"Teacher"`, `"Admin"`, `"SuperAdmin"`), so serde and
//! `FromStr`/`Display` must stay in agreement with the seeded data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user's assigned role. Determines the capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Teacher,
    Admin,
    SuperAdmin,
}

impl Role {
    /// All roles, in ascending privilege order.
    pub const ALL: [Role; 4] = [Role::Student, Role::Teacher, Role::Admin, Role::SuperAdmin];

    /// Roles a visitor may request for themselves at registration.
    ///
    /// Admin and SuperAdmin accounts are never self-requested; they are
    /// assigned by an existing SuperAdmin.
    pub const SELF_REQUESTABLE: [Role; 2] = [Role::Student, Role::Teacher];

    /// Whether this role may be requested at self-registration.
    pub fn self_requestable(self) -> bool {
        Self::SELF_REQUESTABLE.contains(&self)
    }

    /// Whether a caller holding `self` may assign `assigned` to another user.
    ///
    /// SuperAdmin may assign any role. Admin may assign only Student or
    /// Teacher. Student and Teacher may assign nothing.
    pub fn can_assign(self, assigned: Role) -> bool {
        match self {
            Role::SuperAdmin => true,
            Role::Admin => matches!(assigned, Role::Student | Role::Teacher),
            Role::Student | Role::Teacher => false,
        }
    }

    /// Whether this role carries the management capability (user
    /// administration, fees/salaries administration).
    pub fn is_staff_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    /// The canonical wire/database name for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Admin => "Admin",
            Role::SuperAdmin => "SuperAdmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(Role::Student),
            "Teacher" => Ok(Role::Teacher),
            "Admin" => Ok(Role::Admin),
            "SuperAdmin" => Ok(Role::SuperAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized role name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);
