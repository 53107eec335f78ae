//! PostgreSQL-backed bank account repository.
//!
//! Reads join the owning vendor because the listing endpoints serve the
//! with-vendor shape. Writes mirror the vendor repository: revision-guarded
//! updates and full-record changesets.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{BankAccountRepository, RepositoryError, UpdateOutcome};
use crate::domain::{BankAccount, BankAccountDraft, BankAccountWithVendor};

use super::diesel_helpers::{
    INITIAL_REVISION, cast_revision_for_db, interpret_stale_row, map_diesel_error, map_pool_error,
};
use super::models::{BankAccountChangeset, BankAccountRow, NewBankAccountRow, VendorRow};
use super::pool::DbPool;
use super::row_conversions::{row_to_bank_account, row_to_vendor};
use super::schema::{bank_accounts, vendors};

/// Diesel-backed implementation of the bank account repository port.
#[derive(Clone)]
pub struct DieselBankAccountRepository {
    pool: DbPool,
}

impl DieselBankAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn draft_to_new_row(id: Uuid, draft: &BankAccountDraft) -> NewBankAccountRow<'_> {
    NewBankAccountRow {
        id,
        vendor_id: draft.vendor_id(),
        name: draft.name(),
        iban: draft.iban().as_str(),
        bic: draft.bic().as_str(),
        revision: cast_revision_for_db(INITIAL_REVISION),
    }
}

fn draft_to_changeset(draft: &BankAccountDraft, revision: i32) -> BankAccountChangeset<'_> {
    BankAccountChangeset {
        vendor_id: draft.vendor_id(),
        name: draft.name(),
        iban: draft.iban().as_str(),
        bic: draft.bic().as_str(),
        revision,
    }
}

fn joined_row_to_read_model(
    rows: (BankAccountRow, VendorRow),
) -> Result<BankAccountWithVendor, RepositoryError> {
    let (account_row, vendor_row) = rows;
    Ok(BankAccountWithVendor {
        account: row_to_bank_account(account_row)?,
        vendor: row_to_vendor(vendor_row)?,
    })
}

#[async_trait]
impl BankAccountRepository for DieselBankAccountRepository {
    async fn list(&self) -> Result<Vec<BankAccountWithVendor>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(BankAccountRow, VendorRow)> = bank_accounts::table
            .inner_join(vendors::table)
            .select((BankAccountRow::as_select(), VendorRow::as_select()))
            .order((
                vendors::name.asc(),
                bank_accounts::name.asc(),
                bank_accounts::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(joined_row_to_read_model).collect()
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<BankAccountWithVendor>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(BankAccountRow, VendorRow)> = bank_accounts::table
            .inner_join(vendors::table)
            .filter(bank_accounts::id.eq(id))
            .select((BankAccountRow::as_select(), VendorRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(joined_row_to_read_model).transpose()
    }

    async fn insert(&self, draft: &BankAccountDraft) -> Result<BankAccount, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = Uuid::new_v4();
        let row = draft_to_new_row(id, draft);

        diesel::insert_into(bank_accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(BankAccount::from_draft(id, INITIAL_REVISION, draft))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &BankAccountDraft,
        expected_revision: u32,
    ) -> Result<UpdateOutcome, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = draft_to_changeset(draft, cast_revision_for_db(expected_revision + 1));

        let affected = diesel::update(bank_accounts::table.filter(
            bank_accounts::id.eq(id).and(
                bank_accounts::revision.eq(cast_revision_for_db(expected_revision)),
            ),
        ))
        .set(&changeset)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if affected > 0 {
            return Ok(UpdateOutcome::Updated);
        }

        let current = bank_accounts::table
            .filter(bank_accounts::id.eq(id))
            .select(bank_accounts::revision)
            .first::<i32>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(interpret_stale_row(current))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(bank_accounts::table.filter(bank_accounts::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the draft mapping and joined-row conversion helpers.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn draft() -> BankAccountDraft {
        BankAccountDraft::try_from_parts(
            Uuid::new_v4(),
            "Operating",
            "DE89 3704 0044 0532 0130 00",
            "deutdeff",
        )
        .expect("valid draft")
    }

    #[fixture]
    fn joined_row() -> (BankAccountRow, VendorRow) {
        let vendor_id = Uuid::new_v4();
        (
            BankAccountRow {
                id: Uuid::new_v4(),
                vendor_id,
                name: "Operating".to_owned(),
                iban: "DE89370400440532013000".to_owned(),
                bic: "DEUTDEFF".to_owned(),
                revision: 2,
            },
            VendorRow {
                id: vendor_id,
                name: "Acme".to_owned(),
                name2: None,
                address1: "1 Main St".to_owned(),
                address2: None,
                zip: None,
                country: "US".to_owned(),
                city: None,
                mail: "billing@acme.test".to_owned(),
                phone: "+15551234567".to_owned(),
                notes: None,
                revision: 1,
            },
        )
    }

    #[rstest]
    fn new_rows_store_normalised_codes(draft: BankAccountDraft) {
        let id = Uuid::new_v4();
        let row = draft_to_new_row(id, &draft);

        assert_eq!(row.id, id);
        assert_eq!(row.vendor_id, draft.vendor_id());
        assert_eq!(row.iban, "DE89370400440532013000");
        assert_eq!(row.bic, "DEUTDEFF");
        assert_eq!(row.revision, 1);
    }

    #[rstest]
    fn changesets_carry_the_bumped_revision(draft: BankAccountDraft) {
        let changeset = draft_to_changeset(&draft, 3);

        assert_eq!(changeset.vendor_id, draft.vendor_id());
        assert_eq!(changeset.name, "Operating");
        assert_eq!(changeset.revision, 3);
    }

    #[rstest]
    fn joined_rows_convert_to_the_read_model(joined_row: (BankAccountRow, VendorRow)) {
        let read_model = joined_row_to_read_model(joined_row).expect("valid rows convert");

        assert_eq!(read_model.account.vendor_id, read_model.vendor.id);
        assert_eq!(read_model.account.revision, 2);
        assert_eq!(read_model.vendor.name, "Acme");
    }

    #[rstest]
    fn joined_rows_surface_stored_validation_failures(
        mut joined_row: (BankAccountRow, VendorRow),
    ) {
        joined_row.1.phone = "no-plus".to_owned();

        let error = joined_row_to_read_model(joined_row).expect_err("invalid stored phone");
        assert!(matches!(error, RepositoryError::Query { .. }));
    }
}
