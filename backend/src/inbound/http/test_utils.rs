//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Role;
use crate::domain::ports::{
    FixtureAuthenticator, FixtureBankAccountsCommand, FixtureBankAccountsQuery,
    FixtureContactPersonsCommand, FixtureContactPersonsQuery, FixtureTokenService,
    FixtureUsersCommand, FixtureUsersQuery, FixtureVendorsCommand, FixtureVendorsQuery, Principal,
    TokenService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build an [`HttpState`] where every port is a fixture.
///
/// Fields are public, so tests swap individual ports for mocks after
/// construction.
pub fn fixture_state() -> HttpState {
    let tokens: Arc<dyn TokenService> = Arc::new(FixtureTokenService);
    HttpState::new(HttpStatePorts {
        vendors_query: Arc::new(FixtureVendorsQuery),
        vendors: Arc::new(FixtureVendorsCommand),
        bank_accounts_query: Arc::new(FixtureBankAccountsQuery),
        bank_accounts: Arc::new(FixtureBankAccountsCommand),
        contact_persons_query: Arc::new(FixtureContactPersonsQuery),
        contact_persons: Arc::new(FixtureContactPersonsCommand),
        users_query: Arc::new(FixtureUsersQuery),
        users: Arc::new(FixtureUsersCommand),
        authenticator: Arc::new(FixtureAuthenticator::new(tokens.clone())),
        tokens,
    })
}

/// `Authorization` header value the fixture token service accepts,
/// carrying the given roles.
pub fn bearer_for(roles: &[Role]) -> String {
    let principal = Principal {
        user_id: Uuid::new_v4(),
        roles: roles.to_vec(),
    };
    let issued = FixtureTokenService
        .issue(&principal)
        .expect("fixture issuance succeeds");
    format!("Bearer {}", issued.access_token)
}
