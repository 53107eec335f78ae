//! Conversions from Diesel rows to domain records.
//!
//! Stored values pass back through the domain parsers, so a row that no
//! longer satisfies the validation rules surfaces as a query error instead of
//! leaking an invalid record into the read models. Shared here because the
//! joined read models make every entity repository deserialise vendor rows.

use crate::domain::ports::RepositoryError;
use crate::domain::{BankAccount, Bic, ContactPerson, Iban, PhoneNumber, Vendor};

use super::diesel_helpers::cast_revision;
use super::models::{BankAccountRow, ContactPersonRow, VendorRow};

/// Convert a vendors row into a domain vendor.
pub(crate) fn row_to_vendor(row: VendorRow) -> Result<Vendor, RepositoryError> {
    let VendorRow {
        id,
        name,
        name2,
        address1,
        address2,
        zip,
        country,
        city,
        mail,
        phone,
        notes,
        revision,
    } = row;

    let phone = PhoneNumber::parse(&phone).map_err(|err| {
        RepositoryError::query(format!("stored vendor phone failed validation: {err}"))
    })?;

    Ok(Vendor {
        id,
        name,
        name2,
        address1,
        address2,
        zip,
        country,
        city,
        mail,
        phone,
        notes,
        revision: cast_revision(revision),
    })
}

/// Convert a bank_accounts row into a domain bank account.
pub(crate) fn row_to_bank_account(row: BankAccountRow) -> Result<BankAccount, RepositoryError> {
    let BankAccountRow {
        id,
        vendor_id,
        name,
        iban,
        bic,
        revision,
    } = row;

    let iban = Iban::parse(&iban).map_err(|err| {
        RepositoryError::query(format!("stored IBAN failed validation: {err}"))
    })?;
    let bic = Bic::parse(&bic)
        .map_err(|err| RepositoryError::query(format!("stored BIC failed validation: {err}")))?;

    Ok(BankAccount {
        id,
        vendor_id,
        name,
        iban,
        bic,
        revision: cast_revision(revision),
    })
}

/// Convert a contact_persons row into a domain contact person.
pub(crate) fn row_to_contact_person(
    row: ContactPersonRow,
) -> Result<ContactPerson, RepositoryError> {
    let ContactPersonRow {
        id,
        vendor_id,
        first_name,
        last_name,
        phone,
        mail,
        revision,
    } = row;

    let phone = PhoneNumber::parse(&phone).map_err(|err| {
        RepositoryError::query(format!("stored contact phone failed validation: {err}"))
    })?;

    Ok(ContactPerson {
        id,
        vendor_id,
        first_name,
        last_name,
        phone,
        mail,
        revision: cast_revision(revision),
    })
}
