//! # fotolio-auth: Authentication and Authorization for the Fotolio API
//!
//! This crate is the authentication and role-based authorization core behind
//! the Fotolio HTTP API: user registration, credential verification, signed
//! session tokens, token-based identity recovery and role assignment.
//!
//! Storage and HTTP transport are external collaborators. The user store is
//! consumed through the [`UserDirectory`] trait and injected into
//! [`AuthService`] at construction, so tests run against an in-memory double
//! with no shared process state.

pub mod config;
pub mod directory;
pub mod error;
pub mod guard;
pub mod hasher;
pub mod models;
pub mod service;
pub mod token;

// Error handling
pub use error::AuthError;

// Configuration
pub use config::{AuthConfig, JwtConfig, PasswordConfig};

// Collaborator contract
pub use directory::{CreateUser, DirectoryError, DirectoryResult, UserDirectory};

// Core components
pub use guard::RoleGuard;
pub use hasher::{BcryptHasher, PasswordHasher};
pub use models::{NewRole, NewUser, Role, UserProfile, UserRecord};
pub use service::AuthService;
pub use token::{IssuedToken, TokenClaims, TokenService};

/// Authentication result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication system version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
