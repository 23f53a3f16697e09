use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

/// Role is immutable post-creation; only `status` is mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Opaque comparison value, matched for equality at login.
    pub password: String,
    pub role: Role,
    pub status: UserStatus,
}

impl User {
    pub fn new(
        name: String,
        email: String,
        password: String,
        role: Role,
    ) -> anyhow::Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("user name empty");
        }
        if !email.contains('@') {
            anyhow::bail!("invalid email");
        }
        if password.is_empty() {
            anyhow::bail!("password empty");
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            password,
            role,
            status: UserStatus::Active,
        })
    }
}

/// What the API exposes about a user; never carries the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role,
            status: u.status,
        }
    }
}
