//! Authentication configuration types and utilities

use serde::{Deserialize, Serialize};

/// Main authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    pub password: PasswordConfig,
}

/// JWT token configuration
///
/// Two issuance policies coexist: registration mints an effectively
/// perpetual token, login mints a bounded one. Both are plain configuration
/// constants, not protocol invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing (HS256), loaded once at startup
    pub secret: String,

    /// Registration token lifetime in seconds (10 000 000 hours)
    #[serde(default = "default_register_token_expiry")]
    pub register_token_expiry: u64,

    /// Login token lifetime in seconds (20 days)
    #[serde(default = "default_login_token_expiry")]
    pub login_token_expiry: u64,
}

/// Password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    /// Bcrypt cost factor. Verification reads the cost embedded in each
    /// stored hash, so this can change without invalidating old hashes.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

// Default value functions
fn default_register_token_expiry() -> u64 {
    10_000_000 * 60 * 60
} // 10 000 000 hours
fn default_login_token_expiry() -> u64 {
    20 * 24 * 60 * 60
} // 20 days
fn default_bcrypt_cost() -> u32 {
    10
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "default-secret-key-change-in-production-32-chars-long".to_string(),
            register_token_expiry: default_register_token_expiry(),
            login_token_expiry: default_login_token_expiry(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// Create a development configuration with fast hashing
    pub fn development() -> Self {
        let mut config = Self::default();
        config.jwt.secret = "dev-secret-key-change-in-production-32-chars".to_string();
        config.password.bcrypt_cost = 4;
        config
    }

    /// Create a production configuration
    pub fn production() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters".to_string());
        }

        if self.jwt.register_token_expiry == 0 || self.jwt.login_token_expiry == 0 {
            return Err("Token lifetimes must be non-zero".to_string());
        }

        // bcrypt only accepts costs in this range
        if !(4..=31).contains(&self.password.bcrypt_cost) {
            return Err("Bcrypt cost must be between 4 and 31".to_string());
        }

        Ok(())
    }
}
