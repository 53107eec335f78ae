//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain. Read rows select only the columns the read
//! models need; the audit timestamps stay in the database. Changesets set
//! `treat_none_as_null` because updates replace the full record, so an absent
//! optional field must null its column rather than leave it untouched.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bank_accounts, contact_persons, user_roles, users, vendors};

// ---------------------------------------------------------------------------
// Vendor models
// ---------------------------------------------------------------------------

/// Row struct for reading from the vendors table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vendors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VendorRow {
    pub id: Uuid,
    pub name: String,
    pub name2: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
    pub zip: Option<String>,
    pub country: String,
    pub city: Option<String>,
    pub mail: String,
    pub phone: String,
    pub notes: Option<String>,
    pub revision: i32,
}

/// Insertable struct for creating vendor records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vendors)]
pub(crate) struct NewVendorRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub name2: Option<&'a str>,
    pub address1: &'a str,
    pub address2: Option<&'a str>,
    pub zip: Option<&'a str>,
    pub country: &'a str,
    pub city: Option<&'a str>,
    pub mail: &'a str,
    pub phone: &'a str,
    pub notes: Option<&'a str>,
    pub revision: i32,
}

/// Changeset struct for replacing a vendor's mutable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = vendors)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct VendorChangeset<'a> {
    pub name: &'a str,
    pub name2: Option<&'a str>,
    pub address1: &'a str,
    pub address2: Option<&'a str>,
    pub zip: Option<&'a str>,
    pub country: &'a str,
    pub city: Option<&'a str>,
    pub mail: &'a str,
    pub phone: &'a str,
    pub notes: Option<&'a str>,
    pub revision: i32,
}

// ---------------------------------------------------------------------------
// Bank account models
// ---------------------------------------------------------------------------

/// Row struct for reading from the bank_accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bank_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BankAccountRow {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub iban: String,
    pub bic: String,
    pub revision: i32,
}

/// Insertable struct for creating bank account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bank_accounts)]
pub(crate) struct NewBankAccountRow<'a> {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: &'a str,
    pub iban: &'a str,
    pub bic: &'a str,
    pub revision: i32,
}

/// Changeset struct for replacing a bank account's mutable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = bank_accounts)]
pub(crate) struct BankAccountChangeset<'a> {
    pub vendor_id: Uuid,
    pub name: &'a str,
    pub iban: &'a str,
    pub bic: &'a str,
    pub revision: i32,
}

// ---------------------------------------------------------------------------
// Contact person models
// ---------------------------------------------------------------------------

/// Row struct for reading from the contact_persons table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contact_persons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactPersonRow {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: String,
    pub mail: Option<String>,
    pub revision: i32,
}

/// Insertable struct for creating contact person records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contact_persons)]
pub(crate) struct NewContactPersonRow<'a> {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub phone: &'a str,
    pub mail: Option<&'a str>,
    pub revision: i32,
}

/// Changeset struct for replacing a contact person's mutable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contact_persons)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactPersonChangeset<'a> {
    pub vendor_id: Uuid,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub phone: &'a str,
    pub mail: Option<&'a str>,
    pub revision: i32,
}

// ---------------------------------------------------------------------------
// Account models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Insertable struct for creating account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Insertable struct for assigning a role to an account.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_roles)]
pub(crate) struct NewUserRoleRow {
    pub user_id: Uuid,
    pub role_id: i32,
}
