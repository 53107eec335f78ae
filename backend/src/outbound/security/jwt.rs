//! JSON Web Token adapter for the token service port.
//!
//! Tokens are HS256-signed with the account id as subject and role names as
//! a claim. Verification distinguishes an expired signature from every other
//! failure so the refresh flow can accept expired-but-genuine tokens through
//! [`TokenService::peek_expired`].

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Role;
use crate::domain::ports::{IssuedToken, Principal, TokenError, TokenService};

/// Claims carried by every issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    roles: Vec<String>,
    iat: i64,
    exp: i64,
}

/// HS256 token service over a shared signing secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    /// Create a token service signing with `secret` for the given validity
    /// window.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> Result<Principal, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, validation).map_err(|err| {
                match err.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })?;

        claims_to_principal(data.claims)
    }
}

fn claims_to_principal(claims: Claims) -> Result<Principal, TokenError> {
    let roles = claims
        .roles
        .iter()
        .map(|name| name.parse::<Role>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| TokenError::Invalid)?;

    Ok(Principal {
        user_id: claims.sub,
        roles,
    })
}

impl TokenService for JwtTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|err| TokenError::signing(err.to_string()))?;
        let expires_at = now + ttl;
        let claims = Claims {
            sub: principal.user_id,
            roles: principal
                .roles
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| TokenError::signing(err.to_string()))?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        self.decode_with(token, &Validation::new(Algorithm::HS256))
    }

    fn peek_expired(&self, token: &str) -> Result<Principal, TokenError> {
        // The exp claim stays required so truncated tokens still fail; only
        // the expiry comparison is skipped.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        self.decode_with(token, &validation)
    }
}

#[cfg(test)]
mod tests {
    //! Signature, expiry, and claim handling cases.

    use rstest::{fixture, rstest};

    use super::*;

    const SECRET: &[u8] = b"test-signing-secret-0123456789abcdef";

    #[fixture]
    fn principal() -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            roles: vec![Role::Admin, Role::Manager],
        }
    }

    fn service() -> JwtTokenService {
        JwtTokenService::new(SECRET, Duration::from_secs(900))
    }

    /// Sign a token whose expiry is an hour in the past, well outside the
    /// default decoding leeway.
    fn stale_token(secret: &[u8], principal: &Principal) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: principal.user_id,
            roles: principal
                .roles
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
            iat: (now - chrono::Duration::hours(2)).timestamp(),
            exp: (now - chrono::Duration::hours(1)).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .expect("test token encodes")
    }

    #[rstest]
    fn issued_tokens_verify_and_round_trip_the_principal(principal: Principal) {
        let service = service();

        let issued = service.issue(&principal).expect("issuance succeeds");
        let verified = service.verify(&issued.access_token).expect("token verifies");

        assert_eq!(verified, principal);
        assert!(issued.expires_at > Utc::now());
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_invalid(principal: Principal) {
        let issued = JwtTokenService::new(b"other-secret", Duration::from_secs(900))
            .issue(&principal)
            .expect("issuance succeeds");

        let error = service()
            .verify(&issued.access_token)
            .expect_err("foreign signature rejected");
        assert_eq!(error, TokenError::Invalid);
    }

    #[rstest]
    fn garbage_tokens_are_invalid() {
        let error = service()
            .verify("not.a.token")
            .expect_err("garbage rejected");
        assert_eq!(error, TokenError::Invalid);
    }

    #[rstest]
    fn expired_tokens_report_expiry(principal: Principal) {
        let error = service()
            .verify(&stale_token(SECRET, &principal))
            .expect_err("stale token rejected");

        assert_eq!(error, TokenError::Expired);
    }

    #[rstest]
    fn peek_expired_reads_claims_from_stale_tokens(principal: Principal) {
        let peeked = service()
            .peek_expired(&stale_token(SECRET, &principal))
            .expect("stale token still identifies its subject");

        assert_eq!(peeked, principal);
    }

    #[rstest]
    fn peek_expired_still_rejects_foreign_signatures(principal: Principal) {
        let error = service()
            .peek_expired(&stale_token(b"other-secret", &principal))
            .expect_err("foreign signature rejected");
        assert_eq!(error, TokenError::Invalid);
    }

    #[rstest]
    fn unknown_role_claims_are_invalid() {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            roles: vec!["owner".to_owned()],
            iat: now.timestamp(),
            exp: (now + chrono::Duration::minutes(15)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("test token encodes");

        let error = service()
            .verify(&token)
            .expect_err("unknown role rejected");
        assert_eq!(error, TokenError::Invalid);
    }
}
