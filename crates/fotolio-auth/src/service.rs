//! Authentication use cases
//!
//! `AuthService` ties the user directory, the password hasher and the token
//! service into single-shot request/response transactions. There is no
//! long-lived state here: the only process-wide state is the signing secret
//! inside `TokenService`, read-only after startup.

use crate::{
    config::AuthConfig,
    directory::{CreateUser, UserDirectory},
    hasher::{BcryptHasher, PasswordHasher},
    models::{NewRole, NewUser, Role, UserProfile},
    token::TokenService,
    AuthError, AuthResult,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User shape returned by registration: id, email and name only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<&UserProfile> for RegisteredUser {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Successful registration: the new user, a long-lived token and its expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub user: RegisteredUser,
    pub token: String,
    /// Absolute token expiry, ISO-8601
    pub scadenza: DateTime<Utc>,
}

/// Successful login: the sanitized user, a bounded token and its expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub token: String,
    /// Absolute token expiry, ISO-8601
    pub scadenza: DateTime<Utc>,
}

/// The caller's own identity, re-read from the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

/// Full sanitized user listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIndexResponse {
    pub total: u64,
    pub data: Vec<UserProfile>,
}

/// Role listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleIndexResponse {
    pub total: u64,
    #[serde(rename = "totalRoles")]
    pub total_roles: Vec<Role>,
}

/// Role creation confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoleResponse {
    #[serde(rename = "createdRole")]
    pub created_role: Role,
    pub message: String,
}

/// Role assignment confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRoleResponse {
    #[serde(rename = "userToUpdate")]
    pub user_to_update: UserProfile,
    pub message: String,
}

/// Orchestrates registration, login, identity recovery and role assignment
pub struct AuthService<D: UserDirectory> {
    directory: Arc<D>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenService,
    register_ttl: u64,
    login_ttl: u64,
}

impl<D: UserDirectory> AuthService<D> {
    /// Create a service over the injected directory
    pub fn new(config: &AuthConfig, directory: Arc<D>) -> AuthResult<Self> {
        config.validate().map_err(AuthError::internal)?;

        let hasher: Arc<dyn PasswordHasher> =
            Arc::new(BcryptHasher::new(config.password.bcrypt_cost));
        Self::with_hasher(config, directory, hasher)
    }

    /// Create a service with a custom password hasher
    pub fn with_hasher(
        config: &AuthConfig,
        directory: Arc<D>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> AuthResult<Self> {
        Ok(Self {
            directory,
            hasher,
            tokens: TokenService::new(&config.jwt)?,
            register_ttl: config.jwt.register_token_expiry,
            login_ttl: config.jwt.login_token_expiry,
        })
    }

    /// Access the token service, for the transport layer's identity resolution
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Register a new user and mint a long-lived token
    pub async fn register(&self, attributes: NewUser) -> AuthResult<RegistrationResponse> {
        let NewUser {
            email,
            password,
            name,
        } = attributes;

        let password_hash = self.hash_blocking(password).await?;
        let record = self
            .directory
            .create(CreateUser {
                email,
                name,
                password_hash,
            })
            .await?;

        let user = UserProfile::from(record);
        let issued = self.tokens.issue(&user, self.register_ttl)?;
        tracing::debug!(user_id = user.id, "user registered");

        Ok(RegistrationResponse {
            user: RegisteredUser::from(&user),
            token: issued.token,
            scadenza: issued.expires_at,
        })
    }

    /// Verify credentials and mint a bounded-lifetime token
    ///
    /// Unknown email and wrong password produce the same opaque failure, so
    /// the response never reveals which credential was wrong.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<LoginResponse> {
        let record = self.directory.find_by_email(email).await?.ok_or_else(|| {
            tracing::debug!(%email, "login attempt for unknown email");
            AuthError::AuthenticationFailed
        })?;

        let matches = self
            .verify_blocking(password.to_string(), record.password_hash.clone())
            .await?;
        if !matches {
            tracing::debug!(user_id = record.id, "login attempt with wrong password");
            return Err(AuthError::AuthenticationFailed);
        }

        let user = UserProfile::from(record);
        let issued = self.tokens.issue(&user, self.login_ttl)?;
        tracing::debug!(user_id = user.id, "user logged in");

        Ok(LoginResponse {
            user,
            token: issued.token,
            scadenza: issued.expires_at,
        })
    }

    /// Re-read the authenticated caller's identity by id
    ///
    /// Reads the directory rather than trusting the token's embedded
    /// snapshot, so role and name changes since issuance are visible.
    pub async fn fetch_self(&self, authenticated_id: i64) -> AuthResult<ProfileResponse> {
        let record = self
            .directory
            .find_by_id(authenticated_id)
            .await?
            .ok_or_else(|| AuthError::not_found("user"))?;

        Ok(ProfileResponse {
            user: record.into(),
        })
    }

    /// Count and list all users, sanitized. Privileged; gate with a guard.
    pub async fn list_users(&self) -> AuthResult<UserIndexResponse> {
        let total = self.directory.count().await?;
        let data = self.directory.list_all().await?;
        Ok(UserIndexResponse { total, data })
    }

    /// List all roles. Privileged; gate with a guard.
    pub async fn list_roles(&self) -> AuthResult<RoleIndexResponse> {
        let roles = self.directory.list_roles().await?;
        Ok(RoleIndexResponse {
            total: roles.len() as u64,
            total_roles: roles,
        })
    }

    /// Create a role. Privileged; gate with a guard.
    pub async fn create_role(&self, attributes: NewRole) -> AuthResult<CreateRoleResponse> {
        let created = self.directory.create_role(attributes).await?;
        let message = format!("Role {} created", created.name);
        Ok(CreateRoleResponse {
            created_role: created,
            message,
        })
    }

    /// Assign a role to a user, resolving the role by id first
    ///
    /// The client supplies a role id, never a role name: the name embedded in
    /// the updated record always comes from the role table.
    pub async fn assign_role(
        &self,
        target_user_id: i64,
        role_id: i64,
    ) -> AuthResult<AssignRoleResponse> {
        if role_id <= 0 {
            return Err(AuthError::InvalidRole { role_id });
        }
        if target_user_id <= 0 {
            return Err(AuthError::not_found("user"));
        }

        let role = self
            .directory
            .find_role_by_id(role_id)
            .await?
            .ok_or(AuthError::InvalidRole { role_id })?;

        let user_to_update = self.directory.update_role(target_user_id, &role.name).await?;
        tracing::debug!(user_id = target_user_id, role = %role.name, "role assigned");

        Ok(AssignRoleResponse {
            user_to_update,
            message: format!("Role {} assigned to user {}", role.name, target_user_id),
        })
    }

    /// Run the hash on the blocking pool so concurrent requests keep moving
    async fn hash_blocking(&self, password: String) -> AuthResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AuthError::internal(format!("hashing task failed: {e}")))?
    }

    async fn verify_blocking(&self, password: String, hash: String) -> AuthResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::internal(format!("hashing task failed: {e}")))?
    }
}

impl<D: UserDirectory> std::fmt::Debug for AuthService<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("hasher", &self.hasher.hasher_name())
            .field("register_ttl", &self.register_ttl)
            .field("login_ttl", &self.login_ttl)
            .finish_non_exhaustive()
    }
}
