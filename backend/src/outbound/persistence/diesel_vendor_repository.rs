//! PostgreSQL-backed vendor repository.
//!
//! Serves the with-children read model by loading vendors and both child
//! tables together, and enforces optimistic concurrency by filtering updates
//! on the caller's expected revision.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, UpdateOutcome, VendorRepository};
use crate::domain::{BankAccount, ContactPerson, Vendor, VendorDraft, VendorWithChildren};

use super::diesel_helpers::{
    INITIAL_REVISION, cast_revision_for_db, interpret_stale_row, map_diesel_error, map_pool_error,
};
use super::models::{BankAccountRow, ContactPersonRow, NewVendorRow, VendorChangeset, VendorRow};
use super::pool::DbPool;
use super::row_conversions::{row_to_bank_account, row_to_contact_person, row_to_vendor};
use super::schema::{bank_accounts, contact_persons, vendors};

/// Diesel-backed implementation of the vendor repository port.
#[derive(Clone)]
pub struct DieselVendorRepository {
    pool: DbPool,
}

impl DieselVendorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn draft_to_new_row(id: Uuid, draft: &VendorDraft) -> NewVendorRow<'_> {
    NewVendorRow {
        id,
        name: draft.name(),
        name2: draft.name2(),
        address1: draft.address1(),
        address2: draft.address2(),
        zip: draft.zip(),
        country: draft.country(),
        city: draft.city(),
        mail: draft.mail(),
        phone: draft.phone().as_str(),
        notes: draft.notes(),
        revision: cast_revision_for_db(INITIAL_REVISION),
    }
}

fn draft_to_changeset(draft: &VendorDraft, revision: i32) -> VendorChangeset<'_> {
    VendorChangeset {
        name: draft.name(),
        name2: draft.name2(),
        address1: draft.address1(),
        address2: draft.address2(),
        zip: draft.zip(),
        country: draft.country(),
        city: draft.city(),
        mail: draft.mail(),
        phone: draft.phone().as_str(),
        notes: draft.notes(),
        revision,
    }
}

fn group_bank_accounts(
    rows: Vec<BankAccountRow>,
) -> Result<HashMap<Uuid, Vec<BankAccount>>, RepositoryError> {
    let mut grouped: HashMap<Uuid, Vec<BankAccount>> = HashMap::new();
    for row in rows {
        let account = row_to_bank_account(row)?;
        grouped.entry(account.vendor_id).or_default().push(account);
    }
    Ok(grouped)
}

fn group_contact_persons(
    rows: Vec<ContactPersonRow>,
) -> Result<HashMap<Uuid, Vec<ContactPerson>>, RepositoryError> {
    let mut grouped: HashMap<Uuid, Vec<ContactPerson>> = HashMap::new();
    for row in rows {
        let person = row_to_contact_person(row)?;
        grouped.entry(person.vendor_id).or_default().push(person);
    }
    Ok(grouped)
}

#[async_trait]
impl VendorRepository for DieselVendorRepository {
    async fn list(&self) -> Result<Vec<VendorWithChildren>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Read all three tables in a single transaction so the SELECTs
        // observe a consistent MVCC snapshot during concurrent writes.
        let (vendor_rows, account_rows, person_rows) = conn
            .transaction(|conn| {
                async move {
                    let vendor_rows: Vec<VendorRow> = vendors::table
                        .select(VendorRow::as_select())
                        .order((vendors::name.asc(), vendors::id.asc()))
                        .load(conn)
                        .await?;
                    let account_rows: Vec<BankAccountRow> = bank_accounts::table
                        .select(BankAccountRow::as_select())
                        .order((bank_accounts::name.asc(), bank_accounts::id.asc()))
                        .load(conn)
                        .await?;
                    let person_rows: Vec<ContactPersonRow> = contact_persons::table
                        .select(ContactPersonRow::as_select())
                        .order((contact_persons::last_name.asc(), contact_persons::id.asc()))
                        .load(conn)
                        .await?;
                    Ok((vendor_rows, account_rows, person_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let mut accounts_by_vendor = group_bank_accounts(account_rows)?;
        let mut persons_by_vendor = group_contact_persons(person_rows)?;

        vendor_rows
            .into_iter()
            .map(|row| {
                let vendor = row_to_vendor(row)?;
                let bank_accounts = accounts_by_vendor.remove(&vendor.id).unwrap_or_default();
                let contact_persons = persons_by_vendor.remove(&vendor.id).unwrap_or_default();
                Ok(VendorWithChildren {
                    vendor,
                    bank_accounts,
                    contact_persons,
                })
            })
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VendorWithChildren>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let loaded = conn
            .transaction(|conn| {
                async move {
                    let vendor_row: Option<VendorRow> = vendors::table
                        .filter(vendors::id.eq(id))
                        .select(VendorRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(vendor_row) = vendor_row else {
                        return Ok(None);
                    };
                    let account_rows: Vec<BankAccountRow> = bank_accounts::table
                        .filter(bank_accounts::vendor_id.eq(id))
                        .select(BankAccountRow::as_select())
                        .order((bank_accounts::name.asc(), bank_accounts::id.asc()))
                        .load(conn)
                        .await?;
                    let person_rows: Vec<ContactPersonRow> = contact_persons::table
                        .filter(contact_persons::vendor_id.eq(id))
                        .select(ContactPersonRow::as_select())
                        .order((contact_persons::last_name.asc(), contact_persons::id.asc()))
                        .load(conn)
                        .await?;
                    Ok(Some((vendor_row, account_rows, person_rows)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let Some((vendor_row, account_rows, person_rows)) = loaded else {
            return Ok(None);
        };

        let vendor = row_to_vendor(vendor_row)?;
        let bank_accounts = account_rows
            .into_iter()
            .map(row_to_bank_account)
            .collect::<Result<Vec<_>, _>>()?;
        let contact_persons = person_rows
            .into_iter()
            .map(row_to_contact_person)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(VendorWithChildren {
            vendor,
            bank_accounts,
            contact_persons,
        }))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            vendors::table.filter(vendors::id.eq(id)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert(&self, draft: &VendorDraft) -> Result<Vendor, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = Uuid::new_v4();
        let row = draft_to_new_row(id, draft);

        diesel::insert_into(vendors::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Vendor::from_draft(id, INITIAL_REVISION, draft))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &VendorDraft,
        expected_revision: u32,
    ) -> Result<UpdateOutcome, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = draft_to_changeset(draft, cast_revision_for_db(expected_revision + 1));

        let affected = diesel::update(vendors::table.filter(
            vendors::id.eq(id).and(
                vendors::revision.eq(cast_revision_for_db(expected_revision)),
            ),
        ))
        .set(&changeset)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if affected > 0 {
            return Ok(UpdateOutcome::Updated);
        }

        // The guarded update matched nothing: either the row is gone or its
        // revision moved on. Re-read to tell the two apart.
        let current = vendors::table
            .filter(vendors::id.eq(id))
            .select(vendors::revision)
            .first::<i32>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(interpret_stale_row(current))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(vendors::table.filter(vendors::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
