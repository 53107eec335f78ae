//! Port for vendor persistence.
//!
//! Adapters implement this trait over the relational store. Reads return the
//! with-children shape because every vendor-facing endpoint serves it; writes
//! take validated drafts and enforce optimistic concurrency on update.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Vendor, VendorDraft, VendorWithChildren};

use super::repository_error::{RepositoryError, UpdateOutcome};

/// Port for vendor storage and retrieval.
///
/// # Revision Semantics
///
/// - New vendors start at revision 1.
/// - [`VendorRepository::update`] only rewrites the row when the stored
///   revision equals `expected_revision`, and advances it by one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorRepository: Send + Sync {
    /// Fetch every vendor with its children.
    async fn list(&self) -> Result<Vec<VendorWithChildren>, RepositoryError>;

    /// Fetch a single vendor with its children.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VendorWithChildren>, RepositoryError>;

    /// Check whether a vendor row exists without loading it.
    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Persist a new vendor and return the stored record.
    async fn insert(&self, draft: &VendorDraft) -> Result<Vendor, RepositoryError>;

    /// Rewrite the vendor's mutable fields behind a revision check.
    async fn update(
        &self,
        id: Uuid,
        draft: &VendorDraft,
        expected_revision: u32,
    ) -> Result<UpdateOutcome, RepositoryError>;

    /// Delete a vendor row; the store cascades to its children.
    ///
    /// Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// Fixture implementation backed by nothing.
///
/// Reads see an empty store; inserts echo the draft back with a fresh id.
/// Use it in wiring and tests that are not exercising persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVendorRepository;

#[async_trait]
impl VendorRepository for FixtureVendorRepository {
    async fn list(&self) -> Result<Vec<VendorWithChildren>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<VendorWithChildren>, RepositoryError> {
        Ok(None)
    }

    async fn exists(&self, _id: Uuid) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn insert(&self, draft: &VendorDraft) -> Result<Vendor, RepositoryError> {
        Ok(Vendor::from_draft(Uuid::new_v4(), 1, draft))
    }

    async fn update(
        &self,
        _id: Uuid,
        _draft: &VendorDraft,
        _expected_revision: u32,
    ) -> Result<UpdateOutcome, RepositoryError> {
        Ok(UpdateOutcome::Vanished)
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}
