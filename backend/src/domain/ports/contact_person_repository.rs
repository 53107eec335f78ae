//! Port for contact person persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ContactPerson, ContactPersonDraft, ContactPersonWithVendor};

use super::repository_error::{RepositoryError, UpdateOutcome};

/// Port for contact person storage and retrieval.
///
/// Mirrors [`super::BankAccountRepository`]: with-vendor reads, draft writes,
/// revision-guarded updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactPersonRepository: Send + Sync {
    /// Fetch every contact person joined with its owning vendor.
    async fn list(&self) -> Result<Vec<ContactPersonWithVendor>, RepositoryError>;

    /// Fetch a single contact person joined with its owning vendor.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ContactPersonWithVendor>, RepositoryError>;

    /// Persist a new contact person and return the stored record.
    async fn insert(&self, draft: &ContactPersonDraft) -> Result<ContactPerson, RepositoryError>;

    /// Rewrite the contact person's mutable fields behind a revision check.
    async fn update(
        &self,
        id: Uuid,
        draft: &ContactPersonDraft,
        expected_revision: u32,
    ) -> Result<UpdateOutcome, RepositoryError>;

    /// Delete a contact person row.
    ///
    /// Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// Fixture implementation backed by nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactPersonRepository;

#[async_trait]
impl ContactPersonRepository for FixtureContactPersonRepository {
    async fn list(&self) -> Result<Vec<ContactPersonWithVendor>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: Uuid,
    ) -> Result<Option<ContactPersonWithVendor>, RepositoryError> {
        Ok(None)
    }

    async fn insert(&self, draft: &ContactPersonDraft) -> Result<ContactPerson, RepositoryError> {
        Ok(ContactPerson::from_draft(Uuid::new_v4(), 1, draft))
    }

    async fn update(
        &self,
        _id: Uuid,
        _draft: &ContactPersonDraft,
        _expected_revision: u32,
    ) -> Result<UpdateOutcome, RepositoryError> {
        Ok(UpdateOutcome::Vanished)
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}
