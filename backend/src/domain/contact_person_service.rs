//! Contact person domain service.
//!
//! Mirrors [`super::bank_account_service`]: cached reads, vendor ownership
//! checks before writes, and invalidation of the contact person snapshots
//! on every mutation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    CacheKey, ContactPersonRepository, ContactPersonsCommand, ContactPersonsQuery,
    RepositoryError, SnapshotCache, UpdateOutcome, VendorRepository, drop_snapshots,
    read_snapshot, write_snapshot,
};
use crate::domain::{ContactPerson, ContactPersonDraft, ContactPersonWithVendor, Error};

/// Contact person service implementing the driving ports.
#[derive(Clone)]
pub struct ContactPersonService<R, V, C> {
    repo: Arc<R>,
    vendors: Arc<V>,
    cache: Arc<C>,
}

impl<R, V, C> ContactPersonService<R, V, C> {
    /// Create a new service over the contact person repository, the vendor
    /// repository used for ownership checks, and the cache.
    pub fn new(repo: Arc<R>, vendors: Arc<V>, cache: Arc<C>) -> Self {
        Self {
            repo,
            vendors,
            cache,
        }
    }
}

impl<R, V, C> ContactPersonService<R, V, C>
where
    R: ContactPersonRepository,
    V: VendorRepository,
    C: SnapshotCache,
{
    fn map_repository_error(error: RepositoryError) -> Error {
        match error {
            RepositoryError::Unavailable { message } => Error::service_unavailable(format!(
                "contact person repository unavailable: {message}"
            )),
            RepositoryError::Query { message } => {
                Error::internal(format!("contact person repository error: {message}"))
            }
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
        Error::not_found(format!("contact person {id} not found"))
    }

    fn staled_keys(id: Uuid) -> [CacheKey; 2] {
        [CacheKey::contact_person(id), CacheKey::all_contact_persons()]
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
impl<R, V, C> ContactPersonsQuery for ContactPersonService<R, V, C>
where
    R: ContactPersonRepository,
    V: VendorRepository,
    C: SnapshotCache,
{
    async fn list_contact_persons(&self) -> Result<Vec<ContactPersonWithVendor>, Error> {
        let key = CacheKey::all_contact_persons();
        if let Some(cached) = read_snapshot(self.cache.as_ref(), &key).await {
            return Ok(cached);
        }

        let persons = self.repo.list().await.map_err(Self::map_repository_error)?;
        write_snapshot(self.cache.as_ref(), &key, &persons).await;
        Ok(persons)
    }

    async fn get_contact_person(&self, id: Uuid) -> Result<ContactPersonWithVendor, Error> {
        let key = CacheKey::contact_person(id);
        if let Some(cached) = read_snapshot(self.cache.as_ref(), &key).await {
            return Ok(cached);
        }

        let person = self
            .repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))?;
        write_snapshot(self.cache.as_ref(), &key, &person).await;
        Ok(person)
    }
}

#[async_trait]
impl<R, V, C> ContactPersonsCommand for ContactPersonService<R, V, C>
where
    R: ContactPersonRepository,
    V: VendorRepository,
    C: SnapshotCache,
{
    async fn create_contact_person(
        &self,
        draft: ContactPersonDraft,
    ) -> Result<ContactPerson, Error> {
        self.ensure_vendor_exists(draft.vendor_id()).await?;
        let person = self
            .repo
            .insert(&draft)
            .await
            .map_err(Self::map_repository_error)?;
        self.invalidate(person.id).await;
        Ok(person)
    }

    async fn update_contact_person(
        &self,
        id: Uuid,
        draft: ContactPersonDraft,
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

    async fn delete_contact_person(&self, id: Uuid) -> Result<(), Error> {
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
