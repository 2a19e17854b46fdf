//! Users
//!
//! Registration input validation and the stored user shape.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::blog::required_field;
use super::DomainError;

/// Minimum length for username, name and password
pub const MIN_FIELD_LENGTH: usize = 3;

/// A stored user, including the password hash.
///
/// Not `Serialize`; the API responds with `UserResponse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Validated registration input (plain-text password, not yet hashed).
#[derive(Debug, Clone)]
pub struct NewUser {
    username: String,
    name: String,
    password: String,
}

impl NewUser {
    pub fn new(
        username: Option<String>,
        name: Option<String>,
        password: Option<String>,
    ) -> Result<Self, DomainError> {
        let password = password.unwrap_or_default();
        if password.chars().count() < MIN_FIELD_LENGTH {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters long",
                MIN_FIELD_LENGTH
            )));
        }

        let username = required_field("User", "username", username)?;
        check_min_length("username", &username)?;

        let name = required_field("User", "name", name)?;
        check_min_length("name", &name)?;

        Ok(Self {
            username,
            name,
            password,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Swap the plain password for its hash.
    pub fn into_record(self, password_hash: String) -> NewUserRecord {
        NewUserRecord {
            username: self.username,
            name: self.name,
            password_hash,
        }
    }
}

/// What storage receives when a user registers.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

fn check_min_length(field: &str, value: &str) -> Result<(), DomainError> {
    if value.chars().count() < MIN_FIELD_LENGTH {
        return Err(DomainError::Validation(format!(
            "User validation failed: {}: `{}` (`{}`) is shorter than the minimum allowed length ({})",
            field, field, value, MIN_FIELD_LENGTH
        )));
    }
    Ok(())
}
