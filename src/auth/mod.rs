//! Credential handling.

pub mod password;

pub use password::{BcryptHasher, HashError, PasswordHasher};
