use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Hr,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Hr, Role::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Hr => "HR",
            Role::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    // Tags are issued upper-case by the backend and compared exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "HR" => Ok(Role::Hr),
            "EMPLOYEE" => Ok(Role::Employee),
            _ => Err(()),
        }
    }
}

/// Set-semantic view over an ordered role sequence.
pub trait RoleSet {
    fn has_role(&self, role: Role) -> bool;

    fn has_any(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.has_role(*role))
    }
}

impl RoleSet for [Role] {
    fn has_role(&self, role: Role) -> bool {
        self.contains(&role)
    }
}

impl RoleSet for Vec<Role> {
    fn has_role(&self, role: Role) -> bool {
        self.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_upper_case_tags() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("HR".parse::<Role>(), Ok(Role::Hr));
        assert_eq!("EMPLOYEE".parse::<Role>(), Ok(Role::Employee));
        assert!("admin".parse::<Role>().is_err());
        assert!("MANAGER".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_backend_tags() {
        let json = serde_json::to_string(&vec![Role::Hr, Role::Employee]).unwrap();
        assert_eq!(json, r#"["HR","EMPLOYEE"]"#);
        let roles: Vec<Role> = serde_json::from_str(r#"["ADMIN"]"#).unwrap();
        assert_eq!(roles, vec![Role::Admin]);
    }

    #[test]
    fn membership_ignores_duplicates_and_order() {
        let roles = vec![Role::Employee, Role::Hr, Role::Employee];
        assert!(roles.has_role(Role::Hr));
        assert!(roles.has_any(&[Role::Admin, Role::Employee]));
        assert!(!roles.has_role(Role::Admin));
    }
}
