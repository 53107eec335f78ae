//! Driving port for contact person writes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ContactPerson, ContactPersonDraft, Error};

/// Domain use-case port for mutating contact persons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactPersonsCommand: Send + Sync {
    /// Persist a new contact person and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns not-found when the referenced vendor does not exist.
    async fn create_contact_person(
        &self,
        draft: ContactPersonDraft,
    ) -> Result<ContactPerson, Error>;

    /// Replace a contact person's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns not-found when the contact person is gone and a conflict when
    /// the stored revision differs from `expected_revision`.
    async fn update_contact_person(
        &self,
        id: Uuid,
        draft: ContactPersonDraft,
        expected_revision: u32,
    ) -> Result<(), Error>;

    /// Delete a contact person.
    ///
    /// # Errors
    ///
    /// Returns not-found when no contact person carries the id.
    async fn delete_contact_person(&self, id: Uuid) -> Result<(), Error>;
}

/// Fixture command that accepts every write without persisting.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactPersonsCommand;

#[async_trait]
impl ContactPersonsCommand for FixtureContactPersonsCommand {
    async fn create_contact_person(
        &self,
        draft: ContactPersonDraft,
    ) -> Result<ContactPerson, Error> {
        Ok(ContactPerson::from_draft(Uuid::new_v4(), 1, &draft))
    }

    async fn update_contact_person(
        &self,
        _id: Uuid,
        _draft: ContactPersonDraft,
        _expected_revision: u32,
    ) -> Result<(), Error> {
        Ok(())
    }

    async fn delete_contact_person(&self, _id: Uuid) -> Result<(), Error> {
        Ok(())
    }
}
