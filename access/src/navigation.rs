use crate::{
    role::{Role, RoleSet},
    zone::{ADMIN_DASHBOARD_PATH, EMPLOYEE_DASHBOARD_PATH, HR_DASHBOARD_PATH, UNAUTHORIZED_PATH},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

const ADMIN_LINKS: &[NavLink] = &[
    NavLink {
        label: "Admin",
        href: ADMIN_DASHBOARD_PATH,
    },
    NavLink {
        label: "HR",
        href: HR_DASHBOARD_PATH,
    },
    NavLink {
        label: "Employee",
        href: EMPLOYEE_DASHBOARD_PATH,
    },
];

const HR_LINKS: &[NavLink] = &[NavLink {
    label: "HR Dashboard",
    href: HR_DASHBOARD_PATH,
}];

const EMPLOYEE_LINKS: &[NavLink] = &[NavLink {
    label: "My Leaves",
    href: EMPLOYEE_DASHBOARD_PATH,
}];

/// Highest-priority role held, ADMIN > HR > EMPLOYEE.
pub fn primary_role(roles: &[Role]) -> Option<Role> {
    Role::ALL.into_iter().find(|role| roles.has_role(*role))
}

/// Only the highest-priority role's links are shown; an HR user who is also
/// an employee does not get "My Leaves".
pub fn navigation_for(roles: &[Role]) -> &'static [NavLink] {
    match primary_role(roles) {
        Some(Role::Admin) => ADMIN_LINKS,
        Some(Role::Hr) => HR_LINKS,
        Some(Role::Employee) => EMPLOYEE_LINKS,
        None => &[],
    }
}

/// Where a freshly logged-in user is sent.
pub fn landing_path(roles: &[Role]) -> &'static str {
    match primary_role(roles) {
        Some(Role::Admin) => ADMIN_DASHBOARD_PATH,
        Some(Role::Hr) => HR_DASHBOARD_PATH,
        Some(Role::Employee) => EMPLOYEE_DASHBOARD_PATH,
        None => UNAUTHORIZED_PATH,
    }
}
