//! Driving port for login and token refresh.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. This makes HTTP handler tests deterministic because they
//! can substitute a test double instead of wiring persistence.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, LoginCredentials, Role};

use super::token_service::{IssuedToken, Principal, TokenService};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Validate credentials and issue a fresh access token.
    ///
    /// # Errors
    ///
    /// Returns an unauthorized error for an unknown mail address or a wrong
    /// password, without revealing which.
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error>;

    /// Re-issue a token from a possibly expired one.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when the token's signature does not
    /// verify or its subject no longer exists.
    async fn refresh(&self, token: &str) -> Result<IssuedToken, Error>;
}

/// Mail address accepted by [`FixtureAuthenticator`].
pub const FIXTURE_LOGIN_EMAIL: &str = "admin@example.com";
/// Password accepted by [`FixtureAuthenticator`].
pub const FIXTURE_LOGIN_PASSWORD: &str = "password";
/// Subject id issued by [`FixtureAuthenticator`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// In-memory authenticator used when no account store is wired.
///
/// `admin@example.com` / `password` authenticates as an administrator with a
/// fixed subject id; every other credential pair is rejected. Tokens are
/// still real, signed by the supplied service, so the rest of the stack
/// behaves as in production.
#[derive(Clone)]
pub struct FixtureAuthenticator {
    tokens: Arc<dyn TokenService>,
}

impl FixtureAuthenticator {
    /// Create the fixture around a real token service.
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }

    fn fixture_principal() -> Result<Principal, Error> {
        let user_id = Uuid::parse_str(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        Ok(Principal {
            user_id,
            roles: vec![Role::Admin],
        })
    }

    fn issue(&self, principal: &Principal) -> Result<IssuedToken, Error> {
        self.tokens
            .issue(principal)
            .map_err(|err| Error::internal(format!("token issuance failed: {err}")))
    }
}

#[async_trait]
impl Authenticator for FixtureAuthenticator {
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        if credentials.email().as_str() == FIXTURE_LOGIN_EMAIL
            && credentials.password() == FIXTURE_LOGIN_PASSWORD
        {
            self.issue(&Self::fixture_principal()?)
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }

    async fn refresh(&self, token: &str) -> Result<IssuedToken, Error> {
        let principal = self
            .tokens
            .peek_expired(token)
            .map_err(|_| Error::invalid_request("refresh token is invalid"))?;
        self.issue(&principal)
    }
}
