//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    Authenticator, BankAccountsCommand, BankAccountsQuery, ContactPersonsCommand,
    ContactPersonsQuery, TokenService, UsersCommand, UsersQuery, VendorsCommand, VendorsQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub vendors_query: Arc<dyn VendorsQuery>,
    pub vendors: Arc<dyn VendorsCommand>,
    pub bank_accounts_query: Arc<dyn BankAccountsQuery>,
    pub bank_accounts: Arc<dyn BankAccountsCommand>,
    pub contact_persons_query: Arc<dyn ContactPersonsQuery>,
    pub contact_persons: Arc<dyn ContactPersonsCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub users: Arc<dyn UsersCommand>,
    pub authenticator: Arc<dyn Authenticator>,
    pub tokens: Arc<dyn TokenService>,
}

/// Dependency bundle for HTTP handlers.
///
/// `tokens` backs the bearer-token extractor; the remaining ports back one
/// resource surface each.
#[derive(Clone)]
pub struct HttpState {
    pub vendors_query: Arc<dyn VendorsQuery>,
    pub vendors: Arc<dyn VendorsCommand>,
    pub bank_accounts_query: Arc<dyn BankAccountsQuery>,
    pub bank_accounts: Arc<dyn BankAccountsCommand>,
    pub contact_persons_query: Arc<dyn ContactPersonsQuery>,
    pub contact_persons: Arc<dyn ContactPersonsCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub users: Arc<dyn UsersCommand>,
    pub authenticator: Arc<dyn Authenticator>,
    pub tokens: Arc<dyn TokenService>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureAuthenticator, FixtureBankAccountsCommand, FixtureBankAccountsQuery,
    ///     FixtureContactPersonsCommand, FixtureContactPersonsQuery, FixtureTokenService,
    ///     FixtureUsersCommand, FixtureUsersQuery, FixtureVendorsCommand, FixtureVendorsQuery,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let tokens = Arc::new(FixtureTokenService);
    /// let ports = HttpStatePorts {
    ///     vendors_query: Arc::new(FixtureVendorsQuery),
    ///     vendors: Arc::new(FixtureVendorsCommand),
    ///     bank_accounts_query: Arc::new(FixtureBankAccountsQuery),
    ///     bank_accounts: Arc::new(FixtureBankAccountsCommand),
    ///     contact_persons_query: Arc::new(FixtureContactPersonsQuery),
    ///     contact_persons: Arc::new(FixtureContactPersonsCommand),
    ///     users_query: Arc::new(FixtureUsersQuery),
    ///     users: Arc::new(FixtureUsersCommand),
    ///     authenticator: Arc::new(FixtureAuthenticator::new(tokens.clone())),
    ///     tokens,
    /// };
    /// let state = HttpState::new(ports);
    /// let _vendors = state.vendors_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            vendors_query,
            vendors,
            bank_accounts_query,
            bank_accounts,
            contact_persons_query,
            contact_persons,
            users_query,
            users,
            authenticator,
            tokens,
        } = ports;
        Self {
            vendors_query,
            vendors,
            bank_accounts_query,
            bank_accounts,
            contact_persons_query,
            contact_persons,
            users_query,
            users,
            authenticator,
            tokens,
        }
    }
}
