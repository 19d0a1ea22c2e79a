use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyName, UserEmail, UserName};

/// Label stored for administrators.
pub const ADMIN_ROLE: &str = "Administrador";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Administrator,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Administrator => ADMIN_ROLE,
            Role::Other(s) => s,
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        if s == ADMIN_ROLE {
            Role::Administrator
        } else {
            Role::Other(s.to_string())
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// Operator of the dashboard.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub email: UserEmail,
    pub name: UserName,
    pub company: CompanyName,
    pub role: Role,
    pub active: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }
}
