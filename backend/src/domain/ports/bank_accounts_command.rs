//! Driving port for bank account writes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BankAccount, BankAccountDraft, Error};

/// Domain use-case port for mutating bank accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankAccountsCommand: Send + Sync {
    /// Persist a new bank account and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns not-found when the referenced vendor does not exist.
    async fn create_bank_account(&self, draft: BankAccountDraft) -> Result<BankAccount, Error>;

    /// Replace a bank account's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns not-found when the account is gone and a conflict when the
    /// stored revision differs from `expected_revision`.
    async fn update_bank_account(
        &self,
        id: Uuid,
        draft: BankAccountDraft,
        expected_revision: u32,
    ) -> Result<(), Error>;

    /// Delete a bank account.
    ///
    /// # Errors
    ///
    /// Returns not-found when no account carries the id.
    async fn delete_bank_account(&self, id: Uuid) -> Result<(), Error>;
}

/// Fixture command that accepts every write without persisting.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBankAccountsCommand;

#[async_trait]
impl BankAccountsCommand for FixtureBankAccountsCommand {
    async fn create_bank_account(&self, draft: BankAccountDraft) -> Result<BankAccount, Error> {
        Ok(BankAccount::from_draft(Uuid::new_v4(), 1, &draft))
    }

    async fn update_bank_account(
        &self,
        _id: Uuid,
        _draft: BankAccountDraft,
        _expected_revision: u32,
    ) -> Result<(), Error> {
        Ok(())
    }

    async fn delete_bank_account(&self, _id: Uuid) -> Result<(), Error> {
        Ok(())
    }
}
