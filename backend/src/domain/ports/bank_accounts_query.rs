//! Driving port for bank account reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BankAccountWithVendor, Error};

/// Domain use-case port for reading bank accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankAccountsQuery: Send + Sync {
    /// Return every bank account with its owning vendor.
    async fn list_bank_accounts(&self) -> Result<Vec<BankAccountWithVendor>, Error>;

    /// Return a single bank account with its owning vendor.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no account carries the id.
    async fn get_bank_account(&self, id: Uuid) -> Result<BankAccountWithVendor, Error>;
}

/// Fixture query that sees an empty directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBankAccountsQuery;

#[async_trait]
impl BankAccountsQuery for FixtureBankAccountsQuery {
    async fn list_bank_accounts(&self) -> Result<Vec<BankAccountWithVendor>, Error> {
        Ok(Vec::new())
    }

    async fn get_bank_account(&self, id: Uuid) -> Result<BankAccountWithVendor, Error> {
        Err(Error::not_found(format!("bank account {id} not found")))
    }
}
