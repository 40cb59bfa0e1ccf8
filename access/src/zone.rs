use percent_encoding::percent_decode_str;

use crate::role::{Role, RoleSet};

pub const LOGIN_PATH: &str = "/auth/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const ADMIN_DASHBOARD_PATH: &str = "/dashboard/admin";
pub const HR_DASHBOARD_PATH: &str = "/dashboard/hr";
pub const EMPLOYEE_DASHBOARD_PATH: &str = "/dashboard/employee";
pub const PROFILE_PATH: &str = "/dashboard/profile";

/// Path roots the edge gate evaluates; anything outside them is passed
/// through untouched.
pub const PROTECTED_MATCHERS: &[&str] = &["/dashboard", "/auth"];

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const HR_OR_ADMIN: &[Role] = &[Role::Hr, Role::Admin];
const EMPLOYEE_OR_ADMIN: &[Role] = &[Role::Employee, Role::Admin];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteZone {
    Public,
    Admin,
    Hr,
    Employee,
    /// Under a protected matcher without a role predicate.
    Protected,
}

impl RouteZone {
    /// Classification is by string prefix of the normalized path, so
    /// `/dashboard/hr-reports` belongs to the HR zone.
    pub fn classify(path: &str) -> Self {
        let path = normalize_path(path);
        if path.starts_with(LOGIN_PATH) {
            RouteZone::Public
        } else if path.starts_with(ADMIN_DASHBOARD_PATH) {
            RouteZone::Admin
        } else if path.starts_with(HR_DASHBOARD_PATH) {
            RouteZone::Hr
        } else if path.starts_with(EMPLOYEE_DASHBOARD_PATH) {
            RouteZone::Employee
        } else {
            RouteZone::Protected
        }
    }

    /// Roles of which at least one must be held. `None` means any valid
    /// credential (or none at all, for the public zone) is enough.
    pub fn required_roles(&self) -> Option<&'static [Role]> {
        match self {
            RouteZone::Admin => Some(ADMIN_ONLY),
            RouteZone::Hr => Some(HR_OR_ADMIN),
            RouteZone::Employee => Some(EMPLOYEE_OR_ADMIN),
            RouteZone::Public | RouteZone::Protected => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteZone::Public => "public",
            RouteZone::Admin => "admin",
            RouteZone::Hr => "hr",
            RouteZone::Employee => "employee",
            RouteZone::Protected => "protected",
        }
    }
}

/// The single zone predicate shared by the edge and client gates.
pub fn is_permitted(roles: &[Role], path: &str) -> bool {
    match RouteZone::classify(path).required_roles() {
        Some(required) => roles.has_any(required),
        None => true,
    }
}

/// Percent-decodes the path, collapses repeated slashes and resolves `.`
/// and `..` segments. `..` never climbs above the root.
pub fn normalize_path(path: &str) -> String {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Whether the edge gate should look at this path at all.
pub fn is_gated_path(path: &str) -> bool {
    let path = normalize_path(path);
    PROTECTED_MATCHERS.iter().any(|root| {
        path == *root
            || path
                .strip_prefix(root)
                .map(|rest| rest.starts_with('/'))
                .unwrap_or(false)
    })
}
