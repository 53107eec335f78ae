//! Driving port for vendor writes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Vendor, VendorDraft};

/// Domain use-case port for mutating vendors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorsCommand: Send + Sync {
    /// Persist a new vendor and return the stored record.
    async fn create_vendor(&self, draft: VendorDraft) -> Result<Vendor, Error>;

    /// Replace a vendor's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns not-found when the vendor is gone and a conflict when the
    /// stored revision differs from `expected_revision`.
    async fn update_vendor(
        &self,
        id: Uuid,
        draft: VendorDraft,
        expected_revision: u32,
    ) -> Result<(), Error>;

    /// Delete a vendor and, through the store, its children.
    ///
    /// # Errors
    ///
    /// Returns not-found when no vendor carries the id.
    async fn delete_vendor(&self, id: Uuid) -> Result<(), Error>;
}

/// Fixture command that accepts every write without persisting.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVendorsCommand;

#[async_trait]
impl VendorsCommand for FixtureVendorsCommand {
    async fn create_vendor(&self, draft: VendorDraft) -> Result<Vendor, Error> {
        Ok(Vendor::from_draft(Uuid::new_v4(), 1, &draft))
    }

    async fn update_vendor(
        &self,
        _id: Uuid,
        _draft: VendorDraft,
        _expected_revision: u32,
    ) -> Result<(), Error> {
        Ok(())
    }

    async fn delete_vendor(&self, _id: Uuid) -> Result<(), Error> {
        Ok(())
    }
}
