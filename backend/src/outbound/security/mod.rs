//! Credential and token adapters.
//!
//! Implements the credential hasher port with Argon2id and the token service
//! port with HS256 JSON Web Tokens. Both are pure computation over
//! configured secrets; neither touches the network.

mod jwt;
mod password;

pub use jwt::JwtTokenService;
pub use password::Argon2CredentialHasher;
