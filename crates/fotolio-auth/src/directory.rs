//! User directory collaborator contract
//!
//! Persistence of user and role records is owned elsewhere; the auth core
//! consumes it through this trait and is injected with an implementation at
//! construction time, so tests can substitute an in-memory double.

use crate::models::{NewRole, Role, UserProfile, UserRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Directory operation result
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors surfaced by the user directory
///
/// Uniqueness races (two concurrent registrations with the same email) are
/// resolved by the directory's own enforcement and reach the core as
/// `DuplicateEmail`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The email is already registered
    #[error("email already registered: {email}")]
    DuplicateEmail { email: String },

    /// The id did not resolve to a record
    #[error("record not found")]
    NotFound,

    /// Storage malfunction
    #[error("directory backend error: {message}")]
    Backend { message: String },
}

impl DirectoryError {
    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Attributes for creating a user record
///
/// The password arrives already hashed; the directory assigns the id and the
/// default role.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Lookup, creation and mutation of user and role records
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Number of registered users
    async fn count(&self) -> DirectoryResult<u64>;

    /// All users as sanitized projections
    async fn list_all(&self) -> DirectoryResult<Vec<UserProfile>>;

    /// Find a user by email, exact match on the stored value
    async fn find_by_email(&self, email: &str) -> DirectoryResult<Option<UserRecord>>;

    /// Find a user by id
    async fn find_by_id(&self, id: i64) -> DirectoryResult<Option<UserRecord>>;

    /// Create a user, enforcing email uniqueness
    async fn create(&self, attributes: CreateUser) -> DirectoryResult<UserRecord>;

    /// Replace a user's role by role name
    async fn update_role(&self, id: i64, role_name: &str) -> DirectoryResult<UserProfile>;

    /// All known roles
    async fn list_roles(&self) -> DirectoryResult<Vec<Role>>;

    /// Find a role by id
    async fn find_role_by_id(&self, id: i64) -> DirectoryResult<Option<Role>>;

    /// Create a role
    async fn create_role(&self, attributes: NewRole) -> DirectoryResult<Role>;
}
