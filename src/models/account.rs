use crate::domain::Role;
use serde::{Deserialize, Serialize};

/// Account without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    #[serde(skip)]
    pub id: i32,
    pub uuid: String,
    pub username: String,
    #[serde(skip)]
    pub api_key: String,
    pub roles: Vec<Role>,
    pub created_at: String,
    pub updated_at: String,
}

impl Account {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    #[serde(default = "default_roles")]
    pub roles: Vec<Role>,
}

fn default_roles() -> Vec<Role> {
    vec![Role::User]
}

/// Parses the persisted roles column, skipping unknown names.
#[must_use]
pub fn parse_roles(column: &str) -> Vec<Role> {
    crate::models::split_codes(column)
        .iter()
        .filter_map(|r| r.parse().ok())
        .collect()
}

#[must_use]
pub fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_column_round_trip() {
        let roles = vec![Role::Admin, Role::User];
        assert_eq!(format_roles(&roles), "ROLE_ADMIN,ROLE_USER");
        assert_eq!(parse_roles("ROLE_ADMIN,ROLE_USER"), roles);
        assert_eq!(parse_roles("ROLE_USER,ROLE_GHOST"), vec![Role::User]);
    }
}
