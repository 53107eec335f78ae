//! Authentication domain service.
//!
//! Implements the [`Authenticator`] port over the account repository, the
//! password hasher, and the token service. Login failures collapse into a
//! single unauthorized error so callers cannot distinguish an unknown mail
//! address from a wrong password.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    Authenticator, CredentialError, CredentialHasher, IssuedToken, Principal, RepositoryError,
    TokenService, UserRepository,
};
use crate::domain::{Error, LoginCredentials, User};

/// Authentication service implementing the driving port.
#[derive(Clone)]
pub struct AuthService<R, H, T> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> AuthService<R, H, T> {
    /// Create a new service over the account repository, password hasher,
    /// and token service.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<R, H, T> AuthService<R, H, T>
where
    R: UserRepository,
    H: CredentialHasher,
    T: TokenService,
{
    fn map_repository_error(error: RepositoryError) -> Error {
        match error {
            RepositoryError::Unavailable { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            other => Error::internal(format!("user lookup failed: {other}")),
        }
    }

    fn bad_credentials() -> Error {
        Error::unauthorized("invalid credentials")
    }

    fn issue_for(&self, user: &User) -> Result<IssuedToken, Error> {
        let principal = Principal {
            user_id: user.id(),
            roles: user.roles().to_vec(),
        };
        self.tokens
            .issue(&principal)
            .map_err(|error| Error::internal(format!("token issuance failed: {error}")))
    }
}

#[async_trait]
impl<R, H, T> Authenticator for AuthService<R, H, T>
where
    R: UserRepository,
    H: CredentialHasher,
    T: TokenService,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_repository_error)?
        else {
            return Err(Self::bad_credentials());
        };

        let verified = self
            .hasher
            .verify_password(credentials.password(), user.password_hash())
            .map_err(|CredentialError::Hash { message }| {
                Error::internal(format!("stored credential is unreadable: {message}"))
            })?;
        if !verified {
            return Err(Self::bad_credentials());
        }

        self.issue_for(&user)
    }

    async fn refresh(&self, token: &str) -> Result<IssuedToken, Error> {
        let principal = self
            .tokens
            .peek_expired(token)
            .map_err(|_| Error::invalid_request("refresh token is invalid"))?;

        let Some(user) = self
            .users
            .find_by_id(principal.user_id)
            .await
            .map_err(Self::map_repository_error)?
        else {
            return Err(Error::invalid_request("token subject no longer exists"));
        };

        // Roles come from the store, not the presented token, so a role
        // change takes effect on the next refresh.
        self.issue_for(&user)
    }
}
