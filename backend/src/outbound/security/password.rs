//! Argon2 adapter for the credential hasher port.
//!
//! Hashes carry their own salt and parameters in PHC string format, so
//! verification needs no configuration beyond the stored string itself.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

use crate::domain::ports::{CredentialError, CredentialHasher};

/// Credential hasher using Argon2id with the library's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

impl CredentialHasher for Argon2CredentialHasher {
    fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialError::hash(err.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed =
            PasswordHash::new(hash).map_err(|err| CredentialError::hash(err.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialError::hash(err.to_string())),
        }
    }
}
