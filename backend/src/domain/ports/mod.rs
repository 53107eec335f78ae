//! Domain ports and supporting types for the hexagonal boundary.

mod authenticator;
mod bank_account_repository;
mod bank_accounts_command;
mod bank_accounts_query;
mod cache_key;
mod contact_person_repository;
mod contact_persons_command;
mod contact_persons_query;
mod credential_hasher;
mod repository_error;
mod snapshot_cache;
mod token_service;
mod user_repository;
mod users_command;
mod users_query;
mod vendor_repository;
mod vendors_command;
mod vendors_query;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::{
    Authenticator, FIXTURE_LOGIN_EMAIL, FIXTURE_LOGIN_PASSWORD, FIXTURE_USER_ID,
    FixtureAuthenticator,
};
#[cfg(test)]
pub use bank_account_repository::MockBankAccountRepository;
pub use bank_account_repository::{BankAccountRepository, FixtureBankAccountRepository};
#[cfg(test)]
pub use bank_accounts_command::MockBankAccountsCommand;
pub use bank_accounts_command::{BankAccountsCommand, FixtureBankAccountsCommand};
#[cfg(test)]
pub use bank_accounts_query::MockBankAccountsQuery;
pub use bank_accounts_query::{BankAccountsQuery, FixtureBankAccountsQuery};
pub use cache_key::CacheKey;
#[cfg(test)]
pub use contact_person_repository::MockContactPersonRepository;
pub use contact_person_repository::{ContactPersonRepository, FixtureContactPersonRepository};
#[cfg(test)]
pub use contact_persons_command::MockContactPersonsCommand;
pub use contact_persons_command::{ContactPersonsCommand, FixtureContactPersonsCommand};
#[cfg(test)]
pub use contact_persons_query::MockContactPersonsQuery;
pub use contact_persons_query::{ContactPersonsQuery, FixtureContactPersonsQuery};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialError, CredentialHasher};
pub use repository_error::{RepositoryError, UpdateOutcome};
#[cfg(test)]
pub use snapshot_cache::MockSnapshotCache;
pub use snapshot_cache::{
    CacheError, FixtureSnapshotCache, SNAPSHOT_TTL, SnapshotCache, drop_snapshots, read_snapshot,
    write_snapshot,
};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{FixtureTokenService, IssuedToken, Principal, TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{FixtureUsersCommand, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{FixtureUsersQuery, UserSummary, UsersQuery};
#[cfg(test)]
pub use vendor_repository::MockVendorRepository;
pub use vendor_repository::{FixtureVendorRepository, VendorRepository};
#[cfg(test)]
pub use vendors_command::MockVendorsCommand;
pub use vendors_command::{FixtureVendorsCommand, VendorsCommand};
#[cfg(test)]
pub use vendors_query::MockVendorsQuery;
pub use vendors_query::{FixtureVendorsQuery, VendorsQuery};
