//! Bank account domain service.
//!
//! Implements the bank account driving ports. Reads go through the snapshot
//! cache; writes verify the owning vendor first, then persist and drop the
//! bank account snapshots. Vendor snapshots are not touched, so a cached
//! vendor keeps its old child list until the entry expires.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    BankAccountRepository, BankAccountsCommand, BankAccountsQuery, CacheKey, RepositoryError,
    SnapshotCache, UpdateOutcome, VendorRepository, drop_snapshots, read_snapshot, write_snapshot,
};
use crate::domain::{BankAccount, BankAccountDraft, BankAccountWithVendor, Error};

/// Bank account service implementing the driving ports.
#[derive(Clone)]
pub struct BankAccountService<R, V, C> {
    repo: Arc<R>,
    vendors: Arc<V>,
    cache: Arc<C>,
}

impl<R, V, C> BankAccountService<R, V, C> {
    /// Create a new service over the account repository, the vendor
    /// repository used for ownership checks, and the cache.
    pub fn new(repo: Arc<R>, vendors: Arc<V>, cache: Arc<C>) -> Self {
        Self {
            repo,
            vendors,
            cache,
        }
    }
}

impl<R, V, C> BankAccountService<R, V, C>
where
    R: BankAccountRepository,
    V: VendorRepository,
    C: SnapshotCache,
{
    fn map_repository_error(error: RepositoryError) -> Error {
        match error {
            RepositoryError::Unavailable { message } => Error::service_unavailable(format!(
                "bank account repository unavailable: {message}"
            )),
            RepositoryError::Query { message } => {
                Error::internal(format!("bank account repository error: {message}"))
            }
            // The pre-flight vendor check has a race window; the store's
            // foreign key closes it.
            RepositoryError::ForeignKey { message } => {
                Error::not_found(format!("vendor not found: {message}"))
            }
            RepositoryError::Duplicate { message } => {
                Error::internal(format!("unexpected duplicate record: {message}"))
            }
        }
    }

    fn revision_conflict(expected: u32, actual: u32) -> Error {
        Error::conflict("revision mismatch").with_details(json!({
            "expectedRevision": expected,
            "actualRevision": actual,
            "code": "revision_mismatch",
        }))
    }

    fn not_found(id: Uuid) -> Error {
        Error::not_found(format!("bank account {id} not found"))
    }

    fn staled_keys(id: Uuid) -> [CacheKey; 2] {
        [CacheKey::bank_account(id), CacheKey::all_bank_accounts()]
    }

    async fn invalidate(&self, id: Uuid) {
        drop_snapshots(self.cache.as_ref(), &Self::staled_keys(id)).await;
    }

    async fn ensure_vendor_exists(&self, vendor_id: Uuid) -> Result<(), Error> {
        let exists = self.vendors.exists(vendor_id).await.map_err(|error| {
            match error {
                RepositoryError::Unavailable { message } => Error::service_unavailable(format!(
                    "vendor repository unavailable: {message}"
                )),
                other => Error::internal(format!("vendor existence check failed: {other}")),
            }
        })?;
        if exists {
            Ok(())
        } else {
            Err(Error::not_found(format!("vendor {vendor_id} not found")))
        }
    }
}

#[async_trait]
impl<R, V, C> BankAccountsQuery for BankAccountService<R, V, C>
where
    R: BankAccountRepository,
    V: VendorRepository,
    C: SnapshotCache,
{
    async fn list_bank_accounts(&self) -> Result<Vec<BankAccountWithVendor>, Error> {
        let key = CacheKey::all_bank_accounts();
        if let Some(cached) = read_snapshot(self.cache.as_ref(), &key).await {
            return Ok(cached);
        }

        let accounts = self.repo.list().await.map_err(Self::map_repository_error)?;
        write_snapshot(self.cache.as_ref(), &key, &accounts).await;
        Ok(accounts)
    }

    async fn get_bank_account(&self, id: Uuid) -> Result<BankAccountWithVendor, Error> {
        let key = CacheKey::bank_account(id);
        if let Some(cached) = read_snapshot(self.cache.as_ref(), &key).await {
            return Ok(cached);
        }

        let account = self
            .repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))?;
        write_snapshot(self.cache.as_ref(), &key, &account).await;
        Ok(account)
    }
}

#[async_trait]
impl<R, V, C> BankAccountsCommand for BankAccountService<R, V, C>
where
    R: BankAccountRepository,
    V: VendorRepository,
    C: SnapshotCache,
{
    async fn create_bank_account(&self, draft: BankAccountDraft) -> Result<BankAccount, Error> {
        self.ensure_vendor_exists(draft.vendor_id()).await?;
        let account = self
            .repo
            .insert(&draft)
            .await
            .map_err(Self::map_repository_error)?;
        self.invalidate(account.id).await;
        Ok(account)
    }

    async fn update_bank_account(
        &self,
        id: Uuid,
        draft: BankAccountDraft,
        expected_revision: u32,
    ) -> Result<(), Error> {
        self.ensure_vendor_exists(draft.vendor_id()).await?;
        let outcome = self
            .repo
            .update(id, &draft, expected_revision)
            .await
            .map_err(Self::map_repository_error)?;

        match outcome {
            UpdateOutcome::Updated => {
                self.invalidate(id).await;
                Ok(())
            }
            UpdateOutcome::Conflict { actual } => {
                Err(Self::revision_conflict(expected_revision, actual))
            }
            UpdateOutcome::Vanished => Err(Self::not_found(id)),
        }
    }

    async fn delete_bank_account(&self, id: Uuid) -> Result<(), Error> {
        let removed = self
            .repo
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !removed {
            return Err(Self::not_found(id));
        }
        self.invalidate(id).await;
        Ok(())
    }
}
