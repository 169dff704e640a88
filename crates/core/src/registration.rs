//! Self-registration request validation.
//!
//! Validation runs before any network or database work; a request that
//! fails here must leave no trace anywhere.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;

/// Minimum password length accepted at self-registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A self-registration request: the visitor's identity, credentials, the
/// role they are requesting, and the role-specific attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub pending_role: Role,
    #[serde(default)]
    pub roll_no: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

impl RegistrationRequest {
    /// Validate field presence, password strength, and the role-specific
    /// attribute for the requested role.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Name is required".into()));
        }
        if !is_plausible_email(&self.email) {
            return Err(CoreError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        if self.password.len() < MIN_PASSWORD_LENGTH {
            return Err(CoreError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }
        if !self.pending_role.self_requestable() {
            return Err(CoreError::Validation(format!(
                "Role {} cannot be requested at registration",
                self.pending_role
            )));
        }
        match self.pending_role {
            Role::Student if blank(&self.roll_no) => Err(CoreError::Validation(
                "Roll number is required for student registration".into(),
            )),
            Role::Teacher if blank(&self.department) => Err(CoreError::Validation(
                "Department is required for teacher registration".into(),
            )),
            _ => Ok(()),
        }
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Minimal structural email check: one `@` with a non-empty local part and
/// a dotted domain. Full RFC validation is the mail system's problem.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request(pending_role: Role) -> RegistrationRequest {
        RegistrationRequest {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password: "p4ssw0rd!".to_string(),
            pending_role,
            roll_no: Some("17".to_string()),
            department: Some("CS".to_string()),
        }
    }

    #[test]
    fn test_valid_student_and_teacher() {
        assert!(request(Role::Student).validate().is_ok());
        assert!(request(Role::Teacher).validate().is_ok());
    }

    #[test]
    fn test_student_without_roll_no_rejected() {
        let mut req = request(Role::Student);
        req.roll_no = None;
        assert_matches!(req.validate(), Err(CoreError::Validation(_)));

        // Whitespace-only counts as missing.
        req.roll_no = Some("  ".to_string());
        assert_matches!(req.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_teacher_without_department_rejected() {
        let mut req = request(Role::Teacher);
        req.department = None;
        assert_matches!(req.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_admin_roles_not_self_requestable() {
        assert_matches!(
            request(Role::Admin).validate(),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            request(Role::SuperAdmin).validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_short_password_rejected() {
        let mut req = request(Role::Student);
        req.password = "short".to_string();
        assert_matches!(req.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_malformed_email_rejected() {
        for email in ["", "ax.com", "@x.com", "a@", "a@com", "a@.com"] {
            let mut req = request(Role::Student);
            req.email = email.to_string();
            assert_matches!(req.validate(), Err(CoreError::Validation(_)), "{email}");
        }
    }
}
