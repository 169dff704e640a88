//! Static navigation tables: the route map and the per-role sidebar links.
//!
//! Both are fixed configuration data keyed by [`Role`]; nothing here is
//! computed at runtime beyond a lookup.

use crate::guard;
use crate::roles::Role;
use crate::session::Session;

/// A protected view and the roles allowed to render it. An empty `required`
/// slice means "any authenticated user".
#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub path: &'static str,
    pub required: &'static [Role],
}

/// Views reachable without authentication.
pub const PUBLIC_ROUTES: &[&str] = &["/login", "/register"];

/// The protected navigable surface.
pub const PROTECTED_ROUTES: &[RouteRule] = &[
    RouteRule {
        path: "/dashboard",
        required: &[],
    },
    RouteRule {
        path: "/attendance",
        required: &[],
    },
    RouteRule {
        path: "/marks",
        required: &[],
    },
    RouteRule {
        path: "/studymaterials",
        required: &[],
    },
    RouteRule {
        path: "/users",
        required: &[Role::Admin, Role::SuperAdmin],
    },
    RouteRule {
        path: "/fees-salaries",
        required: &[Role::Admin, Role::SuperAdmin],
    },
    RouteRule {
        path: "/fees",
        required: &[Role::Student],
    },
    RouteRule {
        path: "/salaries",
        required: &[Role::Teacher],
    },
];

/// Where a navigation attempt lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Render the requested (or public) view.
    Render(&'static str),
    /// Redirect to the login view.
    RedirectToLogin,
}

/// Resolve a requested path against the route table and the current
/// session. Unknown paths fall back to the login view.
pub fn resolve(path: &str, session: Option<&Session>) -> Destination {
    if let Some(public) = PUBLIC_ROUTES.iter().copied().find(|p| *p == path) {
        return Destination::Render(public);
    }
    match PROTECTED_ROUTES.iter().find(|r| r.path == path) {
        Some(rule) if guard::allow(session, rule.required) => Destination::Render(rule.path),
        Some(_) => Destination::RedirectToLogin,
        None => Destination::RedirectToLogin,
    }
}

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub to: &'static str,
    pub label: &'static str,
}

const STUDENT_LINKS: &[NavLink] = &[
    NavLink {
        to: "/dashboard",
        label: "Home",
    },
    NavLink {
        to: "/attendance",
        label: "Attendance",
    },
    NavLink {
        to: "/marks",
        label: "Marks",
    },
    NavLink {
        to: "/studymaterials",
        label: "Study Materials",
    },
    NavLink {
        to: "/fees",
        label: "Fees",
    },
];

const TEACHER_LINKS: &[NavLink] = &[
    NavLink {
        to: "/dashboard",
        label: "Home",
    },
    NavLink {
        to: "/attendance",
        label: "Attendance",
    },
    NavLink {
        to: "/marks",
        label: "Marks",
    },
    NavLink {
        to: "/studymaterials",
        label: "Study Materials",
    },
    NavLink {
        to: "/salaries",
        label: "Salaries",
    },
];

const ADMIN_LINKS: &[NavLink] = &[
    NavLink {
        to: "/dashboard",
        label: "Home",
    },
    NavLink {
        to: "/attendance",
        label: "Attendance Management",
    },
    NavLink {
        to: "/marks",
        label: "Marks Management",
    },
    NavLink {
        to: "/studymaterials",
        label: "Study Materials Management",
    },
    NavLink {
        to: "/users",
        label: "User Management",
    },
    NavLink {
        to: "/fees-salaries",
        label: "Fees/Salaries Management",
    },
];

/// The sidebar links for a role.
pub fn links_for(role: Role) -> &'static [NavLink] {
    match role {
        Role::Student => STUDENT_LINKS,
        Role::Teacher => TEACHER_LINKS,
        Role::Admin | Role::SuperAdmin => ADMIN_LINKS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use chrono::Utc;

    fn session(role: Role) -> Session {
        Session {
            profile: Profile {
                id: 9,
                name: "S".to_string(),
                email: "s@x.com".to_string(),
                role: Some(role),
                pending_role: role,
                approved: true,
                roll_no: None,
                department: None,
                created_at: Utc::now(),
            },
            token: "tok".to_string(),
        }
    }

    #[test]
    fn test_public_routes_render_without_session() {
        assert_eq!(resolve("/login", None), Destination::Render("/login"));
        assert_eq!(resolve("/register", None), Destination::Render("/register"));
    }

    #[test]
    fn test_unknown_path_falls_back_to_login() {
        assert_eq!(resolve("/nope", None), Destination::RedirectToLogin);
        let s = session(Role::SuperAdmin);
        assert_eq!(resolve("/nope", Some(&s)), Destination::RedirectToLogin);
    }

    #[test]
    fn test_student_surface() {
        let s = session(Role::Student);
        assert_eq!(
            resolve("/dashboard", Some(&s)),
            Destination::Render("/dashboard")
        );
        assert_eq!(resolve("/fees", Some(&s)), Destination::Render("/fees"));
        assert_eq!(resolve("/salaries", Some(&s)), Destination::RedirectToLogin);
        assert_eq!(resolve("/users", Some(&s)), Destination::RedirectToLogin);
    }

    #[test]
    fn test_teacher_salaries_only() {
        let s = session(Role::Teacher);
        assert_eq!(
            resolve("/salaries", Some(&s)),
            Destination::Render("/salaries")
        );
        assert_eq!(resolve("/fees", Some(&s)), Destination::RedirectToLogin);
    }

    #[test]
    fn test_admin_management_surface() {
        for role in [Role::Admin, Role::SuperAdmin] {
            let s = session(role);
            assert_eq!(resolve("/users", Some(&s)), Destination::Render("/users"));
            assert_eq!(
                resolve("/fees-salaries", Some(&s)),
                Destination::Render("/fees-salaries")
            );
        }
    }

    #[test]
    fn test_protected_routes_require_session() {
        for rule in PROTECTED_ROUTES {
            assert_eq!(resolve(rule.path, None), Destination::RedirectToLogin);
        }
    }

    #[test]
    fn test_links_match_route_table() {
        // Every sidebar link must point at a route its role may render.
        for role in Role::ALL {
            let s = session(role);
            for link in links_for(role) {
                assert_eq!(
                    resolve(link.to, Some(&s)),
                    Destination::Render(link.to),
                    "{role} link {}",
                    link.to
                );
            }
        }
    }
}
