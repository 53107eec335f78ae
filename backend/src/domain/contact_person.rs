//! Contact person aggregate.
//!
//! Only the phone number carries a format rule; names and mail are optional
//! free text. See [`super::phone`] for the normalisation applied.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::phone::{PhoneNumber, PhoneValidationError};
use super::vendor::Vendor;

/// Validation errors returned by [`ContactPersonDraft::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactPersonValidationError {
    /// The phone number failed validation.
    Phone(PhoneValidationError),
}

impl fmt::Display for ContactPersonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phone(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for ContactPersonValidationError {}

impl From<PhoneValidationError> for ContactPersonValidationError {
    fn from(value: PhoneValidationError) -> Self {
        Self::Phone(value)
    }
}

/// Contact person attached to a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ContactPerson {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Owning vendor.
    pub vendor_id: Uuid,
    /// Given name, if recorded.
    pub first_name: Option<String>,
    /// Family name, if recorded.
    pub last_name: Option<String>,
    /// Normalised phone number.
    #[schema(value_type = String, example = "+49 30 901820")]
    pub phone: PhoneNumber,
    /// Mail address, if recorded.
    pub mail: Option<String>,
    /// Revision number for optimistic concurrency.
    pub revision: u32,
}

impl ContactPerson {
    /// Materialise a contact person from a validated draft.
    #[must_use]
    pub fn from_draft(id: Uuid, revision: u32, draft: &ContactPersonDraft) -> Self {
        Self {
            id,
            vendor_id: draft.vendor_id(),
            first_name: draft.first_name().map(ToOwned::to_owned),
            last_name: draft.last_name().map(ToOwned::to_owned),
            phone: draft.phone().clone(),
            mail: draft.mail().map(ToOwned::to_owned),
            revision,
        }
    }
}

/// Validated mutable-field set for creating or replacing a contact person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPersonDraft {
    vendor_id: Uuid,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: PhoneNumber,
    mail: Option<String>,
}

impl ContactPersonDraft {
    /// Construct a draft from raw field inputs.
    pub fn try_from_parts(
        vendor_id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: &str,
        mail: Option<String>,
    ) -> Result<Self, ContactPersonValidationError> {
        let phone = PhoneNumber::parse(phone)?;

        Ok(Self {
            vendor_id,
            first_name,
            last_name,
            phone,
            mail,
        })
    }

    /// Owning vendor identifier.
    #[must_use]
    pub fn vendor_id(&self) -> Uuid {
        self.vendor_id
    }

    /// Given name, if provided.
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Family name, if provided.
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Validated phone number.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Mail address, if provided.
    pub fn mail(&self) -> Option<&str> {
        self.mail.as_deref()
    }
}

/// Read model pairing a contact person with its owning vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ContactPersonWithVendor {
    /// The contact person itself.
    pub person: ContactPerson,
    /// The owning vendor.
    pub vendor: Vendor,
}

#[cfg(test)]
mod tests {
    //! Validation cases for the contact person draft.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn draft_accepts_minimal_fields() {
        let vendor_id = Uuid::new_v4();
        let draft = ContactPersonDraft::try_from_parts(vendor_id, None, None, "+4930901820", None)
            .expect("valid draft");

        assert_eq!(draft.vendor_id(), vendor_id);
        assert_eq!(draft.first_name(), None);
        assert_eq!(draft.last_name(), None);
        assert_eq!(draft.phone().as_str(), "+4930901820");
        assert_eq!(draft.mail(), None);
    }

    #[rstest]
    fn draft_keeps_optional_fields() {
        let draft = ContactPersonDraft::try_from_parts(
            Uuid::new_v4(),
            Some("Ada".to_owned()),
            Some("Lovelace".to_owned()),
            "+44 20 7946 0958",
            Some("ada@example.com".to_owned()),
        )
        .expect("valid draft");

        assert_eq!(draft.first_name(), Some("Ada"));
        assert_eq!(draft.last_name(), Some("Lovelace"));
        assert_eq!(draft.phone().as_str(), "+442079460958");
        assert_eq!(draft.mail(), Some("ada@example.com"));
    }

    #[rstest]
    #[case("", PhoneValidationError::Empty)]
    #[case("030 901820", PhoneValidationError::MissingLeadingPlus)]
    #[case("+0", PhoneValidationError::InvalidDigits)]
    fn draft_rejects_invalid_phones(#[case] phone: &str, #[case] expected: PhoneValidationError) {
        let err = ContactPersonDraft::try_from_parts(Uuid::new_v4(), None, None, phone, None)
            .expect_err("invalid phone rejected");
        assert_eq!(err, ContactPersonValidationError::Phone(expected));
    }
}
