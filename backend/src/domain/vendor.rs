//! Vendor aggregate, its validated draft, and the with-children read model.
//!
//! The draft is the validation boundary: handlers map inbound payloads into
//! [`VendorDraft`] before anything touches a port, so services and
//! repositories only ever see field values that already satisfy the rules.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::bank_account::BankAccount;
use super::contact_person::ContactPerson;
use super::phone::{PhoneNumber, PhoneValidationError};

/// Validation errors returned by [`VendorDraftBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// First address line was missing or blank once trimmed.
    EmptyAddress,
    /// Country was missing or blank once trimmed.
    EmptyCountry,
    /// Mail address was missing or blank once trimmed.
    EmptyMail,
    /// The phone number failed validation.
    Phone(PhoneValidationError),
}

impl fmt::Display for VendorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "vendor name must not be empty"),
            Self::EmptyAddress => write!(f, "vendor address must not be empty"),
            Self::EmptyCountry => write!(f, "vendor country must not be empty"),
            Self::EmptyMail => write!(f, "vendor mail address must not be empty"),
            Self::Phone(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for VendorValidationError {}

impl From<PhoneValidationError> for VendorValidationError {
    fn from(value: PhoneValidationError) -> Self {
        Self::Phone(value)
    }
}

/// Vendor master-data record.
///
/// Vendors use optimistic concurrency via the `revision` field. Clients must
/// echo the current revision when updating; mismatches surface as conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Vendor {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Legal or trading name.
    pub name: String,
    /// Additional name line, if any.
    pub name2: Option<String>,
    /// First address line.
    pub address1: String,
    /// Second address line, if any.
    pub address2: Option<String>,
    /// Postal code, if any.
    pub zip: Option<String>,
    /// Country name or code.
    pub country: String,
    /// City, if any.
    pub city: Option<String>,
    /// Mail address.
    pub mail: String,
    /// Normalised phone number.
    #[schema(value_type = String, example = "+15551234567")]
    pub phone: PhoneNumber,
    /// Free-form notes, if any.
    pub notes: Option<String>,
    /// Revision number for optimistic concurrency.
    pub revision: u32,
}

impl Vendor {
    /// Materialise a vendor from a validated draft.
    #[must_use]
    pub fn from_draft(id: Uuid, revision: u32, draft: &VendorDraft) -> Self {
        Self {
            id,
            name: draft.name().to_owned(),
            name2: draft.name2().map(ToOwned::to_owned),
            address1: draft.address1().to_owned(),
            address2: draft.address2().map(ToOwned::to_owned),
            zip: draft.zip().map(ToOwned::to_owned),
            country: draft.country().to_owned(),
            city: draft.city().map(ToOwned::to_owned),
            mail: draft.mail().to_owned(),
            phone: draft.phone().clone(),
            notes: draft.notes().map(ToOwned::to_owned),
            revision,
        }
    }
}

/// Validated mutable-field set for creating or replacing a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorDraft {
    name: String,
    name2: Option<String>,
    address1: String,
    address2: Option<String>,
    zip: Option<String>,
    country: String,
    city: Option<String>,
    mail: String,
    phone: PhoneNumber,
    notes: Option<String>,
}

impl VendorDraft {
    /// Create a builder seeded with the required fields.
    pub fn builder(
        name: impl Into<String>,
        address1: impl Into<String>,
        country: impl Into<String>,
        mail: impl Into<String>,
        phone: impl Into<String>,
    ) -> VendorDraftBuilder {
        VendorDraftBuilder::new(name, address1, country, mail, phone)
    }

    /// Trimmed vendor name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Additional name line, if provided.
    pub fn name2(&self) -> Option<&str> {
        self.name2.as_deref()
    }

    /// Trimmed first address line.
    pub fn address1(&self) -> &str {
        self.address1.as_str()
    }

    /// Second address line, if provided.
    pub fn address2(&self) -> Option<&str> {
        self.address2.as_deref()
    }

    /// Postal code, if provided.
    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    /// Trimmed country.
    pub fn country(&self) -> &str {
        self.country.as_str()
    }

    /// City, if provided.
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Trimmed mail address.
    pub fn mail(&self) -> &str {
        self.mail.as_str()
    }

    /// Validated phone number.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Free-form notes, if provided.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Builder for [`VendorDraft`].
///
/// Required fields are taken up front; optional fields default to absent.
/// [`VendorDraftBuilder::build`] validates in field order and short-circuits
/// on the first violation.
#[derive(Debug, Clone)]
pub struct VendorDraftBuilder {
    name: String,
    name2: Option<String>,
    address1: String,
    address2: Option<String>,
    zip: Option<String>,
    country: String,
    city: Option<String>,
    mail: String,
    phone: String,
    notes: Option<String>,
}

impl VendorDraftBuilder {
    /// Create a builder seeded with the required fields.
    pub fn new(
        name: impl Into<String>,
        address1: impl Into<String>,
        country: impl Into<String>,
        mail: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            name2: None,
            address1: address1.into(),
            address2: None,
            zip: None,
            country: country.into(),
            city: None,
            mail: mail.into(),
            phone: phone.into(),
            notes: None,
        }
    }

    /// Set the optional additional name line.
    pub fn name2(mut self, value: Option<String>) -> Self {
        self.name2 = value;
        self
    }

    /// Set the optional second address line.
    pub fn address2(mut self, value: Option<String>) -> Self {
        self.address2 = value;
        self
    }

    /// Set the optional postal code.
    pub fn zip(mut self, value: Option<String>) -> Self {
        self.zip = value;
        self
    }

    /// Set the optional city.
    pub fn city(mut self, value: Option<String>) -> Self {
        self.city = value;
        self
    }

    /// Set the optional notes.
    pub fn notes(mut self, value: Option<String>) -> Self {
        self.notes = value;
        self
    }

    /// Validate the collected fields and build the draft.
    pub fn build(self) -> Result<VendorDraft, VendorValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(VendorValidationError::EmptyName);
        }
        let address1 = self.address1.trim();
        if address1.is_empty() {
            return Err(VendorValidationError::EmptyAddress);
        }
        let country = self.country.trim();
        if country.is_empty() {
            return Err(VendorValidationError::EmptyCountry);
        }
        let mail = self.mail.trim();
        if mail.is_empty() {
            return Err(VendorValidationError::EmptyMail);
        }
        let phone = PhoneNumber::parse(&self.phone)?;

        Ok(VendorDraft {
            name: name.to_owned(),
            name2: self.name2,
            address1: address1.to_owned(),
            address2: self.address2,
            zip: self.zip,
            country: country.to_owned(),
            city: self.city,
            mail: mail.to_owned(),
            phone,
            notes: self.notes,
        })
    }
}

/// Read model embedding a vendor's bank accounts and contact persons.
///
/// Single-vendor reads and vendor listings both serve this shape; a freshly
/// created vendor has empty child collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct VendorWithChildren {
    /// The vendor record.
    pub vendor: Vendor,
    /// Bank accounts owned by the vendor.
    pub bank_accounts: Vec<BankAccount>,
    /// Contact persons attached to the vendor.
    pub contact_persons: Vec<ContactPerson>,
}

impl VendorWithChildren {
    /// Wrap a vendor that has no children yet.
    #[must_use]
    pub fn childless(vendor: Vendor) -> Self {
        Self {
            vendor,
            bank_accounts: Vec::new(),
            contact_persons: Vec::new(),
        }
    }
}
