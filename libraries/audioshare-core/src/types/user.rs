/// User domain types
use crate::error::{AudioShareError, Result};
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// User account. The password hash never leaves the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Login name, unique across users
    pub username: String,
}

/// Sign-up payload
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl CreateUser {
    /// All three fields are required and must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AudioShareError::invalid_input("name is required"));
        }
        if self.username.trim().is_empty() {
            return Err(AudioShareError::invalid_input("username is required"));
        }
        if self.password.is_empty() {
            return Err(AudioShareError::invalid_input("password is required"));
        }
        Ok(())
    }
}
