//! Port for password hashing and verification.

use thiserror::Error;

/// Errors raised by credential hasher implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Hashing failed or the stored hash could not be parsed.
    #[error("credential hashing failed: {message}")]
    Hash {
        /// Implementation-provided detail.
        message: String,
    },
}

impl CredentialError {
    /// Helper for hashing failures.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// Port for salted password hashing.
///
/// Verification distinguishes "wrong password" (`Ok(false)`) from "stored
/// hash is unreadable" (`Err`), so login can treat the former as bad
/// credentials and the latter as a server fault.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing PHC string.
    fn hash_password(&self, password: &str) -> Result<String, CredentialError>;

    /// Check a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}
