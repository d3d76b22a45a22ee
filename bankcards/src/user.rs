//! User entity and roles

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role enumeration for authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Role name as carried in token claims (`"USER"` / `"ADMIN"`)
    pub fn name(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Parse a role name from token claims
    pub fn parse(name: &str) -> Option<Role> {
        match name {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// User entity
///
/// Identity is immutable once created; roles determine which card
/// operations the owning principal may perform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// One-way credential hash; the raw password is never stored
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: HashSet<Role>,
}

impl User {
    /// Create a user with the default role set `{USER}`
    pub fn new(
        username: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            first_name,
            last_name,
            roles: HashSet::from([Role::User]),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_default_user_role() {
        let user = User::new(
            "alice".to_string(),
            "$2b$04$hash".to_string(),
            "Alice".to_string(),
            "Smith".to_string(),
        );
        assert!(user.has_role(Role::User));
        assert!(!user.has_role(Role::Admin));
    }

    #[test]
    fn role_names_round_trip() {
        assert_eq!(Role::parse(Role::Admin.name()), Some(Role::Admin));
        assert_eq!(Role::parse(Role::User.name()), Some(Role::User));
        assert_eq!(Role::parse("ROOT"), None);
    }
}
