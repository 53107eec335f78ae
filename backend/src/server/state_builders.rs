//! Builders for HTTP state ports backed by the configured infrastructure.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    FixtureAuthenticator, FixtureBankAccountsCommand, FixtureBankAccountsQuery,
    FixtureContactPersonsCommand, FixtureContactPersonsQuery, FixtureSnapshotCache,
    FixtureUsersCommand, FixtureUsersQuery, FixtureVendorsCommand, FixtureVendorsQuery,
    SnapshotCache,
};
use crate::domain::{
    AuthService, BankAccountService, ContactPersonService, UserAdminService, VendorService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::persistence::{
    DbPool, DieselBankAccountRepository, DieselContactPersonRepository, DieselUserRepository,
    DieselVendorRepository,
};
use crate::outbound::security::{Argon2CredentialHasher, JwtTokenService};

use super::ServerConfig;

/// Build the HTTP state from the configured infrastructure.
///
/// Database-backed services are wired when a pool is present, reading through
/// the Redis snapshot cache when one is configured and a no-op cache
/// otherwise. Without a pool every port falls back to its fixture so the
/// surface stays explorable.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let tokens = Arc::new(JwtTokenService::new(
        &config.signing_key,
        config.access_token_ttl,
    ));
    let ports = match (&config.db_pool, &config.snapshot_cache) {
        (Some(pool), Some(cache)) => db_backed_ports(pool, Arc::new(cache.clone()), tokens),
        (Some(pool), None) => db_backed_ports(pool, Arc::new(FixtureSnapshotCache), tokens),
        (None, _) => fixture_ports(tokens),
    };
    web::Data::new(HttpState::new(ports))
}

fn db_backed_ports<C>(pool: &DbPool, cache: Arc<C>, tokens: Arc<JwtTokenService>) -> HttpStatePorts
where
    C: SnapshotCache + 'static,
{
    let vendor_repo = Arc::new(DieselVendorRepository::new(pool.clone()));
    let account_repo = Arc::new(DieselBankAccountRepository::new(pool.clone()));
    let person_repo = Arc::new(DieselContactPersonRepository::new(pool.clone()));
    let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let hasher = Arc::new(Argon2CredentialHasher);

    let vendors = Arc::new(VendorService::new(vendor_repo.clone(), cache.clone()));
    let bank_accounts = Arc::new(BankAccountService::new(
        account_repo,
        vendor_repo.clone(),
        cache.clone(),
    ));
    let contact_persons = Arc::new(ContactPersonService::new(person_repo, vendor_repo, cache));
    let users = Arc::new(UserAdminService::new(user_repo.clone(), hasher.clone()));
    let authenticator = Arc::new(AuthService::new(user_repo, hasher, tokens.clone()));

    HttpStatePorts {
        vendors_query: vendors.clone(),
        vendors,
        bank_accounts_query: bank_accounts.clone(),
        bank_accounts,
        contact_persons_query: contact_persons.clone(),
        contact_persons,
        users_query: users.clone(),
        users,
        authenticator,
        tokens,
    }
}

fn fixture_ports(tokens: Arc<JwtTokenService>) -> HttpStatePorts {
    HttpStatePorts {
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
    }
}
