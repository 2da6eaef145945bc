//! User and role records shared across the auth core

use serde::{Deserialize, Serialize};

/// A registered principal as stored by the user directory.
///
/// Deliberately not `Serialize`: the password hash must never reach an
/// outward-facing representation. Convert to [`UserProfile`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    /// Role name, resolved by the directory
    pub role: String,
}

/// Sanitized projection of a [`UserRecord`]: everything but the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&UserRecord> for UserProfile {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            name: record.name.clone(),
            role: record.role.clone(),
        }
    }
}

impl From<UserRecord> for UserProfile {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            role: record.role,
        }
    }
}

/// An authorization level, referenced by id in requests and by name in tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// Registration attributes, validated upstream
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Role creation attributes
#[derive(Debug, Clone, Deserialize)]
pub struct NewRole {
    pub name: String,
}
