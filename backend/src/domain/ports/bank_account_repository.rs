//! Port for bank account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BankAccount, BankAccountDraft, BankAccountWithVendor};

use super::repository_error::{RepositoryError, UpdateOutcome};

/// Port for bank account storage and retrieval.
///
/// Reads return the with-vendor shape served by the listing endpoints. The
/// owning vendor is checked by the service before writes, but adapters still
/// surface [`RepositoryError::ForeignKey`] if the vendor disappears between
/// the check and the write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankAccountRepository: Send + Sync {
    /// Fetch every bank account joined with its owning vendor.
    async fn list(&self) -> Result<Vec<BankAccountWithVendor>, RepositoryError>;

    /// Fetch a single bank account joined with its owning vendor.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<BankAccountWithVendor>, RepositoryError>;

    /// Persist a new bank account and return the stored record.
    async fn insert(&self, draft: &BankAccountDraft) -> Result<BankAccount, RepositoryError>;

    /// Rewrite the account's mutable fields behind a revision check.
    async fn update(
        &self,
        id: Uuid,
        draft: &BankAccountDraft,
        expected_revision: u32,
    ) -> Result<UpdateOutcome, RepositoryError>;

    /// Delete a bank account row.
    ///
    /// Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// Fixture implementation backed by nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBankAccountRepository;

#[async_trait]
impl BankAccountRepository for FixtureBankAccountRepository {
    async fn list(&self) -> Result<Vec<BankAccountWithVendor>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: Uuid,
    ) -> Result<Option<BankAccountWithVendor>, RepositoryError> {
        Ok(None)
    }

    async fn insert(&self, draft: &BankAccountDraft) -> Result<BankAccount, RepositoryError> {
        Ok(BankAccount::from_draft(Uuid::new_v4(), 1, draft))
    }

    async fn update(
        &self,
        _id: Uuid,
        _draft: &BankAccountDraft,
        _expected_revision: u32,
    ) -> Result<UpdateOutcome, RepositoryError> {
        Ok(UpdateOutcome::Vanished)
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}
