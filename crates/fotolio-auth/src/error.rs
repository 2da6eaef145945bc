//! Authentication and authorization error types

use crate::directory::DirectoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication and authorization errors
///
/// Authentication failures are deliberately opaque: the variant never reveals
/// whether the email or the password was wrong. Internal failures keep their
/// detail for server-side logs only.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthError {
    /// Bad credentials. Covers both unknown email and wrong password.
    #[error("Autenticazione fallita")]
    AuthenticationFailed,

    /// Registration conflict: the email is already taken
    #[error("Registration failed")]
    DuplicateEmail { email: String },

    /// Identity or role lookup miss
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Malformed or non-existent role id
    #[error("Invalid role id: {role_id}")]
    InvalidRole { role_id: i64 },

    /// Authorization denial
    #[error("Accesso non autorizzato")]
    Forbidden { required: String },

    /// Token signature or structure failure on decode
    #[error("Invalid token")]
    InvalidToken { message: String },

    /// Storage or hashing malfunction, surfaced generically
    #[error("Internal error")]
    Internal { message: String },
}

impl AuthError {
    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::AuthenticationFailed => "AUTHENTICATION_FAILED",
            AuthError::DuplicateEmail { .. } => "DUPLICATE_EMAIL",
            AuthError::NotFound { .. } => "NOT_FOUND",
            AuthError::InvalidRole { .. } => "INVALID_ROLE",
            AuthError::Forbidden { .. } => "FORBIDDEN",
            AuthError::InvalidToken { .. } => "INVALID_TOKEN",
            AuthError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code for the error
    ///
    /// Duplicate email maps to 500, not 409: registration failures surface as
    /// a generic server error at the boundary and the cause stays in the logs.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::AuthenticationFailed => 401,
            AuthError::DuplicateEmail { .. } => 500,
            AuthError::NotFound { .. } => 404,
            AuthError::InvalidRole { .. } => 422,
            AuthError::Forbidden { .. } => 403,
            AuthError::InvalidToken { .. } => 401,
            AuthError::Internal { .. } => 500,
        }
    }

    /// Create a not-found error for the named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a token error
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Conversion from common error types

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::invalid_token(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("bcrypt failure: {}", err);
        Self::internal(err.to_string())
    }
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateEmail { email } => {
                tracing::warn!(%email, "registration rejected: email already taken");
                Self::DuplicateEmail { email }
            }
            DirectoryError::NotFound => Self::not_found("user"),
            DirectoryError::Backend { message } => {
                tracing::error!("directory failure: {}", message);
                Self::internal(message)
            }
        }
    }
}
