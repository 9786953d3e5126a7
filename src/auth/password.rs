//! Password hashing.

use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(#[from] bcrypt::BcryptError);

/// One-way password hashing used before a user record is stored.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, HashError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}

/// bcrypt with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        Ok(hash(password, self.cost)?)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(verify(password, hash)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = BcryptHasher::new(4);
        let hashed = hasher.hash("secret123").unwrap();

        assert_ne!(hashed, "secret123");
        assert!(hashed.starts_with("$2"));
        assert!(hasher.verify("secret123", &hashed).unwrap());
        assert!(!hasher.verify("secret124", &hashed).unwrap());
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(BcryptHasher::new(2).hash("secret123").is_err());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(BcryptHasher::default().verify("secret123", "plain").is_err());
    }
}
