//! Password hashing

use crate::AuthResult;
use bcrypt::{hash, verify};

/// Password hasher trait for different hashing algorithms
///
/// A mismatch is a normal `Ok(false)`, never an error. Errors are reserved
/// for catastrophic conditions such as a malformed stored hash.
pub trait PasswordHasher: Send + Sync {
    /// Hash a password
    fn hash_password(&self, password: &str) -> AuthResult<String>;

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> AuthResult<bool>;

    /// Get the hasher name
    fn hasher_name(&self) -> &str;
}

/// bcrypt password hasher
///
/// Each call salts independently, so two hashes of the same plaintext differ.
/// The cost factor is embedded in the produced hash and verification honors
/// the stored cost, not the configured one.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a new bcrypt hasher with custom cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Create a bcrypt hasher optimized for development (faster)
    pub fn development() -> Self {
        Self { cost: 4 }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: 10 }
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash_password(&self, password: &str) -> AuthResult<String> {
        hash(password, self.cost).map_err(Into::into)
    }

    fn verify_password(&self, password: &str, hash: &str) -> AuthResult<bool> {
        verify(password, hash).map_err(Into::into)
    }

    fn hasher_name(&self) -> &str {
        "bcrypt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = BcryptHasher::development(); // low cost for tests
        let password = "secret1";

        let hash = hasher.hash_password(password).unwrap();
        assert!(!hash.is_empty());
        assert_ne!(hash, password);

        assert!(hasher.verify_password(password, &hash).unwrap());
        assert!(!hasher.verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_salt_uniqueness() {
        let hasher = BcryptHasher::development();
        let password = "secret1";

        let first = hasher.hash_password(password).unwrap();
        let second = hasher.hash_password(password).unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify_password(password, &first).unwrap());
        assert!(hasher.verify_password(password, &second).unwrap());
    }

    #[test]
    fn test_verify_honors_stored_cost() {
        // A hash produced at cost 4 still verifies through a hasher
        // configured with a different cost.
        let old = BcryptHasher::new(4);
        let hash = old.hash_password("secret1").unwrap();

        let current = BcryptHasher::new(6);
        assert!(current.verify_password("secret1", &hash).unwrap());
        assert!(!current.verify_password("secret2", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = BcryptHasher::development();
        assert!(hasher.verify_password("secret1", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_hasher_name() {
        assert_eq!(BcryptHasher::default().hasher_name(), "bcrypt");
    }
}
