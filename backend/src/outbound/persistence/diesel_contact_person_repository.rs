//! PostgreSQL-backed contact person repository.
//!
//! Mirrors the bank account repository: joined reads for the with-vendor
//! shape, revision-guarded updates, and full-record changesets that null
//! absent optional fields.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ContactPersonRepository, RepositoryError, UpdateOutcome};
use crate::domain::{ContactPerson, ContactPersonDraft, ContactPersonWithVendor};

use super::diesel_helpers::{
    INITIAL_REVISION, cast_revision_for_db, interpret_stale_row, map_diesel_error, map_pool_error,
};
use super::models::{ContactPersonChangeset, ContactPersonRow, NewContactPersonRow, VendorRow};
use super::pool::DbPool;
use super::row_conversions::{row_to_contact_person, row_to_vendor};
use super::schema::{contact_persons, vendors};

/// Diesel-backed implementation of the contact person repository port.
#[derive(Clone)]
pub struct DieselContactPersonRepository {
    pool: DbPool,
}

impl DieselContactPersonRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn draft_to_new_row(id: Uuid, draft: &ContactPersonDraft) -> NewContactPersonRow<'_> {
    NewContactPersonRow {
        id,
        vendor_id: draft.vendor_id(),
        first_name: draft.first_name(),
        last_name: draft.last_name(),
        phone: draft.phone().as_str(),
        mail: draft.mail(),
        revision: cast_revision_for_db(INITIAL_REVISION),
    }
}

fn draft_to_changeset(draft: &ContactPersonDraft, revision: i32) -> ContactPersonChangeset<'_> {
    ContactPersonChangeset {
        vendor_id: draft.vendor_id(),
        first_name: draft.first_name(),
        last_name: draft.last_name(),
        phone: draft.phone().as_str(),
        mail: draft.mail(),
        revision,
    }
}

fn joined_row_to_read_model(
    rows: (ContactPersonRow, VendorRow),
) -> Result<ContactPersonWithVendor, RepositoryError> {
    let (person_row, vendor_row) = rows;
    Ok(ContactPersonWithVendor {
        person: row_to_contact_person(person_row)?,
        vendor: row_to_vendor(vendor_row)?,
    })
}

#[async_trait]
impl ContactPersonRepository for DieselContactPersonRepository {
    async fn list(&self) -> Result<Vec<ContactPersonWithVendor>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(ContactPersonRow, VendorRow)> = contact_persons::table
            .inner_join(vendors::table)
            .select((ContactPersonRow::as_select(), VendorRow::as_select()))
            .order((
                vendors::name.asc(),
                contact_persons::last_name.asc(),
                contact_persons::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(joined_row_to_read_model).collect()
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ContactPersonWithVendor>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(ContactPersonRow, VendorRow)> = contact_persons::table
            .inner_join(vendors::table)
            .filter(contact_persons::id.eq(id))
            .select((ContactPersonRow::as_select(), VendorRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(joined_row_to_read_model).transpose()
    }

    async fn insert(&self, draft: &ContactPersonDraft) -> Result<ContactPerson, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = Uuid::new_v4();
        let row = draft_to_new_row(id, draft);

        diesel::insert_into(contact_persons::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ContactPerson::from_draft(id, INITIAL_REVISION, draft))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &ContactPersonDraft,
        expected_revision: u32,
    ) -> Result<UpdateOutcome, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = draft_to_changeset(draft, cast_revision_for_db(expected_revision + 1));

        let affected = diesel::update(contact_persons::table.filter(
            contact_persons::id.eq(id).and(
                contact_persons::revision.eq(cast_revision_for_db(expected_revision)),
            ),
        ))
        .set(&changeset)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if affected > 0 {
            return Ok(UpdateOutcome::Updated);
        }

        let current = contact_persons::table
            .filter(contact_persons::id.eq(id))
            .select(contact_persons::revision)
            .first::<i32>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(interpret_stale_row(current))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(contact_persons::table.filter(contact_persons::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
