//! Port for signed access token issuance and verification.
//!
//! Tokens are transient: they encode the account id as subject plus role
//! claims, and are reconstructable only from a live account and the signing
//! key. The refresh flow needs to read claims out of an expired token, so the
//! port exposes a signature-only variant alongside full verification.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::Role;

/// Authenticated identity extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Account identifier carried as the token subject.
    pub user_id: Uuid,
    /// Roles carried as claims.
    pub roles: Vec<Role>,
}

impl Principal {
    /// True when the principal holds at least one of the required roles.
    ///
    /// An empty requirement accepts any authenticated principal.
    #[must_use]
    pub fn has_any_role(&self, required: &[Role]) -> bool {
        required.is_empty() || required.iter().any(|role| self.roles.contains(role))
    }
}

/// Freshly signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact serialized token for the Authorization header.
    pub access_token: String,
    /// Instant the token stops verifying.
    pub expires_at: DateTime<Utc>,
}

/// Errors raised by token service implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Malformed token, bad signature, or unusable claims.
    #[error("token is invalid")]
    Invalid,
    /// Signature verified but the validity window has passed.
    #[error("token has expired")]
    Expired,
    /// The token could not be signed.
    #[error("token signing failed: {message}")]
    Signing {
        /// Implementation-provided detail.
        message: String,
    },
}

impl TokenError {
    /// Helper for signing failures.
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }
}

/// Port for issuing and checking access tokens.
///
/// Operations are pure computation over the signing key, so the port is
/// synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token for the principal with the configured validity window.
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError>;

    /// Verify signature and expiry, returning the embedded principal.
    fn verify(&self, token: &str) -> Result<Principal, TokenError>;

    /// Verify the signature only, ignoring expiry.
    ///
    /// Supports refresh: an expired token still identifies its subject as
    /// long as the signature holds.
    fn peek_expired(&self, token: &str) -> Result<Principal, TokenError>;
}

const FIXTURE_TOKEN_PREFIX: &str = "fixture.";
const FIXTURE_TOKEN_TTL_MINUTES: i64 = 15;

/// Unsigned token scheme for demos, doctests, and handler tests.
///
/// Tokens are plain text of the form `fixture.{subject}.{role+role}` and
/// never expire, so [`TokenService::peek_expired`] is plain verification.
/// Anything without the prefix fails as [`TokenError::Invalid`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureTokenService;

impl TokenService for FixtureTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        let roles = principal
            .roles
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join("+");
        Ok(IssuedToken {
            access_token: format!("{FIXTURE_TOKEN_PREFIX}{}.{roles}", principal.user_id),
            expires_at: Utc::now() + chrono::Duration::minutes(FIXTURE_TOKEN_TTL_MINUTES),
        })
    }

    fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let rest = token
            .strip_prefix(FIXTURE_TOKEN_PREFIX)
            .ok_or(TokenError::Invalid)?;
        let (subject, roles) = rest.split_once('.').ok_or(TokenError::Invalid)?;
        let user_id = subject.parse::<Uuid>().map_err(|_| TokenError::Invalid)?;
        let roles = roles
            .split('+')
            .filter(|part| !part.is_empty())
            .map(str::parse::<Role>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| TokenError::Invalid)?;
        Ok(Principal { user_id, roles })
    }

    fn peek_expired(&self, token: &str) -> Result<Principal, TokenError> {
        self.verify(token)
    }
}
