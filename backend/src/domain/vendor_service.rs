//! Vendor directory domain service.
//!
//! Implements the vendor driving ports with a read-through snapshot cache in
//! front of the repository. Reads consult the cache first and repopulate it on
//! a miss; writes go straight to the repository and then drop every snapshot
//! the write could have staled.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    CacheKey, RepositoryError, SnapshotCache, UpdateOutcome, VendorRepository, VendorsCommand,
    VendorsQuery, drop_snapshots, read_snapshot, write_snapshot,
};
use crate::domain::{Error, Vendor, VendorDraft, VendorWithChildren};

/// Vendor service implementing the driving ports.
#[derive(Clone)]
pub struct VendorService<R, C> {
    repo: Arc<R>,
    cache: Arc<C>,
}

impl<R, C> VendorService<R, C> {
    /// Create a new service over the given repository and cache.
    pub fn new(repo: Arc<R>, cache: Arc<C>) -> Self {
        Self { repo, cache }
    }
}

impl<R, C> VendorService<R, C>
where
    R: VendorRepository,
    C: SnapshotCache,
{
    fn map_repository_error(error: RepositoryError) -> Error {
        match error {
            RepositoryError::Unavailable { message } => {
                Error::service_unavailable(format!("vendor repository unavailable: {message}"))
            }
            RepositoryError::Query { message } => {
                Error::internal(format!("vendor repository error: {message}"))
            }
            RepositoryError::ForeignKey { message } => {
                Error::internal(format!("unexpected foreign key failure: {message}"))
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
        Error::not_found(format!("vendor {id} not found"))
    }

    /// Keys staled by a vendor write. The child collection listings embed
    /// vendor fields, so they are dropped alongside the vendor keys.
    fn staled_keys(id: Uuid) -> [CacheKey; 4] {
        [
            CacheKey::vendor(id),
            CacheKey::all_vendors(),
            CacheKey::all_bank_accounts(),
            CacheKey::all_contact_persons(),
        ]
    }

    async fn invalidate(&self, id: Uuid) {
        drop_snapshots(self.cache.as_ref(), &Self::staled_keys(id)).await;
    }
}

#[async_trait]
impl<R, C> VendorsQuery for VendorService<R, C>
where
    R: VendorRepository,
    C: SnapshotCache,
{
    async fn list_vendors(&self) -> Result<Vec<VendorWithChildren>, Error> {
        let key = CacheKey::all_vendors();
        if let Some(cached) = read_snapshot(self.cache.as_ref(), &key).await {
            return Ok(cached);
        }

        let vendors = self.repo.list().await.map_err(Self::map_repository_error)?;
        write_snapshot(self.cache.as_ref(), &key, &vendors).await;
        Ok(vendors)
    }

    async fn get_vendor(&self, id: Uuid) -> Result<VendorWithChildren, Error> {
        let key = CacheKey::vendor(id);
        if let Some(cached) = read_snapshot(self.cache.as_ref(), &key).await {
            return Ok(cached);
        }

        let vendor = self
            .repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))?;
        write_snapshot(self.cache.as_ref(), &key, &vendor).await;
        Ok(vendor)
    }
}

#[async_trait]
impl<R, C> VendorsCommand for VendorService<R, C>
where
    R: VendorRepository,
    C: SnapshotCache,
{
    async fn create_vendor(&self, draft: VendorDraft) -> Result<Vendor, Error> {
        let vendor = self
            .repo
            .insert(&draft)
            .await
            .map_err(Self::map_repository_error)?;
        self.invalidate(vendor.id).await;
        Ok(vendor)
    }

    async fn update_vendor(
        &self,
        id: Uuid,
        draft: VendorDraft,
        expected_revision: u32,
    ) -> Result<(), Error> {
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

    async fn delete_vendor(&self, id: Uuid) -> Result<(), Error> {
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
