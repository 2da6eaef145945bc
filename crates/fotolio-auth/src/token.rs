//! Signed session tokens
//!
//! Tokens are self-contained HS256 JWTs embedding the sanitized user
//! projection. Decoding verifies signature and structure only; expiry
//! enforcement belongs to the request-authentication step in the transport
//! layer, which resolves the caller's identity on each request.

use crate::{config::JwtConfig, models::UserProfile, AuthError, AuthResult};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use serde::{Deserialize, Serialize};

/// Minimum accepted signing secret length in bytes
const MIN_SECRET_LENGTH: usize = 32;

/// Claims carried by a session token
///
/// The payload is exactly the sanitized projection plus the standard
/// issued-at and expiry claims. No password-derived field ever appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: i64,
    pub email: String,
    pub name: String,
    /// Role name at mint time. Not re-validated against storage afterwards;
    /// a role change takes effect on the next login.
    pub role: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// A freshly minted token together with its absolute expiry
///
/// Issuance responses always expose the exact expiry instant, not just a
/// relative lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and decodes signed session tokens
///
/// Holds the process-wide signing secret, loaded once at startup.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service from JWT configuration
    pub fn new(config: &JwtConfig) -> AuthResult<Self> {
        if config.secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::internal(format!(
                "JWT secret must be at least {} characters",
                MIN_SECRET_LENGTH
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Signature and structure only. Expired tokens still decode.
        validation.validate_exp = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Sign a token over the sanitized projection with the given lifetime
    pub fn issue(&self, user: &UserProfile, ttl_secs: u64) -> AuthResult<IssuedToken> {
        let iat = Utc::now().timestamp();
        let exp = iat + ttl_secs as i64;

        let claims = TokenClaims {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            iat,
            exp,
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::internal("token expiry out of representable range"))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Decode a token, verifying signature and structure
    pub fn decode(&self, token: &str) -> AuthResult<TokenClaims> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("token decode failed: {}", e);
                AuthError::from(e)
            })?;
        Ok(data.claims)
    }

    /// Absolute expiry of a token, from its signed expiry claim
    pub fn expiry_of(&self, token: &str) -> AuthResult<DateTime<Utc>> {
        let claims = self.decode(token)?;
        DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AuthError::invalid_token("expiry claim out of range"))
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

/// Generate a random alphanumeric signing secret
pub fn generate_secret(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
