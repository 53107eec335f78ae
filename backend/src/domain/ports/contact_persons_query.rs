//! Driving port for contact person reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ContactPersonWithVendor, Error};

/// Domain use-case port for reading contact persons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactPersonsQuery: Send + Sync {
    /// Return every contact person with its owning vendor.
    async fn list_contact_persons(&self) -> Result<Vec<ContactPersonWithVendor>, Error>;

    /// Return a single contact person with its owning vendor.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no contact person carries the id.
    async fn get_contact_person(&self, id: Uuid) -> Result<ContactPersonWithVendor, Error>;
}

/// Fixture query that sees an empty directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactPersonsQuery;

#[async_trait]
impl ContactPersonsQuery for FixtureContactPersonsQuery {
    async fn list_contact_persons(&self) -> Result<Vec<ContactPersonWithVendor>, Error> {
        Ok(Vec::new())
    }

    async fn get_contact_person(&self, id: Uuid) -> Result<ContactPersonWithVendor, Error> {
        Err(Error::not_found(format!("contact person {id} not found")))
    }
}
