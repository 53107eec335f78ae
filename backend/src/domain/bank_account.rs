//! Bank account aggregate with IBAN and BIC field validation.
//!
//! IBANs are checked structurally and against the ISO 7064 mod-97 checksum;
//! BICs are checked against the 8/11-character ISO 9362 pattern. Both types
//! store the normalised (whitespace-free, upper-case) form.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::vendor::Vendor;

/// Validation errors returned by [`Iban::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IbanValidationError {
    /// The string does not match the country/check-digit/account structure.
    Format,
    /// The check digits do not satisfy the ISO 7064 mod-97 rule.
    Checksum,
}

impl fmt::Display for IbanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => write!(
                f,
                "IBAN does not match the expected country, check digit, and account structure"
            ),
            Self::Checksum => write!(f, "IBAN check digits do not match the account number"),
        }
    }
}

impl std::error::Error for IbanValidationError {}

/// Validation error returned by [`Bic::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BicValidationError;

impl fmt::Display for BicValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BIC must be 8 or 11 characters of institution, country, and location codes"
        )
    }
}

impl std::error::Error for BicValidationError {}

/// Shortest IBAN issued by any participating country.
pub const IBAN_LEN_MIN: usize = 15;
/// ISO 13616 caps IBANs at 34 characters.
pub const IBAN_LEN_MAX: usize = 34;

static IBAN_RE: OnceLock<Regex> = OnceLock::new();

fn iban_regex() -> &'static Regex {
    IBAN_RE.get_or_init(|| {
        // Two-letter country, two check digits, then the national account body.
        let pattern = "^[A-Z]{2}[0-9]{2}[A-Z0-9]{11,30}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("IBAN regex failed to compile: {error}"))
    })
}

static BIC_RE: OnceLock<Regex> = OnceLock::new();

fn bic_regex() -> &'static Regex {
    BIC_RE.get_or_init(|| {
        // Four-letter institution, two-letter country, alphanumeric location,
        // optional three-character branch.
        let pattern = "^[A-Z]{4}[A-Z]{2}[A-Z0-9]{2}(?:[A-Z0-9]{3})?$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("BIC regex failed to compile: {error}"))
    })
}

/// Checks the ISO 7064 mod-97 rule over the rearranged IBAN.
///
/// Letters map to 10..=35 and digits pass through, so each letter appends two
/// decimal digits and each digit appends one. Working modulo 97 after every
/// step keeps the accumulator inside `u32`.
fn iban_checksum_is_valid(normalised: &str) -> bool {
    let (prefix, body) = normalised.split_at(4);
    let mut remainder: u32 = 0;
    for ch in body.chars().chain(prefix.chars()) {
        // The structure check has already constrained the alphabet.
        let Some(value) = ch.to_digit(36) else {
            return false;
        };
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }
    remainder == 1
}

/// International Bank Account Number stored in normalised form.
///
/// ## Invariants
/// - Upper-case with no whitespace.
/// - Matches the ISO 13616 structure and the ISO 7064 mod-97 checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iban(String);

impl Iban {
    /// Validate, normalise, and construct an [`Iban`].
    ///
    /// Whitespace is stripped and letters are upper-cased before validation,
    /// so the print format `DE89 3704 0044 0532 0130 00` is accepted.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, IbanValidationError> {
        let normalised: String = input
            .as_ref()
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(|ch| ch.to_ascii_uppercase())
            .collect();

        if !iban_regex().is_match(&normalised) {
            return Err(IbanValidationError::Format);
        }
        if !iban_checksum_is_valid(&normalised) {
            return Err(IbanValidationError::Checksum);
        }

        Ok(Self(normalised))
    }

    /// Borrow the normalised IBAN.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Iban {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Iban> for String {
    fn from(value: Iban) -> Self {
        value.0
    }
}

impl TryFrom<String> for Iban {
    type Error = IbanValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Bank Identifier Code stored in normalised form.
///
/// ## Invariants
/// - Upper-case, trimmed, 8 or 11 characters.
/// - Matches the ISO 9362 institution/country/location/branch pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bic(String);

impl Bic {
    /// Validate, normalise, and construct a [`Bic`].
    pub fn parse(input: impl AsRef<str>) -> Result<Self, BicValidationError> {
        let normalised = input.as_ref().trim().to_ascii_uppercase();
        if !bic_regex().is_match(&normalised) {
            return Err(BicValidationError);
        }

        Ok(Self(normalised))
    }

    /// Borrow the normalised BIC.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Bic {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Bic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Bic> for String {
    fn from(value: Bic) -> Self {
        value.0
    }
}

impl TryFrom<String> for Bic {
    type Error = BicValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Validation errors returned by [`BankAccountDraft::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankAccountValidationError {
    /// Account name was missing or blank once trimmed.
    EmptyName,
    /// The IBAN failed validation.
    Iban(IbanValidationError),
    /// The BIC failed validation.
    Bic(BicValidationError),
}

impl fmt::Display for BankAccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "bank account name must not be empty"),
            Self::Iban(error) => write!(f, "{error}"),
            Self::Bic(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for BankAccountValidationError {}

impl From<IbanValidationError> for BankAccountValidationError {
    fn from(value: IbanValidationError) -> Self {
        Self::Iban(value)
    }
}

impl From<BicValidationError> for BankAccountValidationError {
    fn from(value: BicValidationError) -> Self {
        Self::Bic(value)
    }
}

/// Bank account owned by a vendor.
///
/// Accounts use optimistic concurrency via the `revision` field; clients must
/// echo the current revision when updating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct BankAccount {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Owning vendor.
    pub vendor_id: Uuid,
    /// Account holder or account label.
    pub name: String,
    /// Validated account number.
    #[schema(value_type = String, example = "DE89370400440532013000")]
    pub iban: Iban,
    /// Validated bank identifier.
    #[schema(value_type = String, example = "DEUTDEFF")]
    pub bic: Bic,
    /// Revision number for optimistic concurrency.
    pub revision: u32,
}

impl BankAccount {
    /// Materialise an account from a validated draft.
    #[must_use]
    pub fn from_draft(id: Uuid, revision: u32, draft: &BankAccountDraft) -> Self {
        Self {
            id,
            vendor_id: draft.vendor_id(),
            name: draft.name().to_owned(),
            iban: draft.iban().clone(),
            bic: draft.bic().clone(),
            revision,
        }
    }
}

/// Validated mutable-field set for creating or replacing a bank account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccountDraft {
    vendor_id: Uuid,
    name: String,
    iban: Iban,
    bic: Bic,
}

impl BankAccountDraft {
    /// Construct a draft from raw field inputs.
    ///
    /// Validation short-circuits on the first failing field: name, then IBAN,
    /// then BIC.
    pub fn try_from_parts(
        vendor_id: Uuid,
        name: &str,
        iban: &str,
        bic: &str,
    ) -> Result<Self, BankAccountValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BankAccountValidationError::EmptyName);
        }
        let iban = Iban::parse(iban)?;
        let bic = Bic::parse(bic)?;

        Ok(Self {
            vendor_id,
            name: name.to_owned(),
            iban,
            bic,
        })
    }

    /// Owning vendor identifier.
    #[must_use]
    pub fn vendor_id(&self) -> Uuid {
        self.vendor_id
    }

    /// Trimmed account name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Validated IBAN.
    pub fn iban(&self) -> &Iban {
        &self.iban
    }

    /// Validated BIC.
    pub fn bic(&self) -> &Bic {
        &self.bic
    }
}

/// Read model pairing a bank account with its owning vendor.
///
/// Listings serve this shape so callers see vendor details without a second
/// lookup; cached copies therefore go stale when the vendor changes, which is
/// why vendor writes also drop the bank account collection key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct BankAccountWithVendor {
    /// The account itself.
    pub account: BankAccount,
    /// The owning vendor.
    pub vendor: Vendor,
}

#[cfg(test)]
mod tests {
    //! Validation cases for IBAN, BIC, and the bank account draft.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("DE89370400440532013000")]
    #[case("DE89 3704 0044 0532 0130 00")]
    #[case("GB29 NWBK 6016 1331 9268 19")]
    #[case("FR14 2004 1010 0505 0001 3M02 606")]
    #[case("NL91ABNA0417164300")]
    fn iban_accepts_valid_examples(#[case] input: &str) {
        let iban = Iban::parse(input).expect("valid IBAN");
        assert!(!iban.as_str().contains(' '));
    }

    #[rstest]
    fn iban_normalises_case_and_spacing() {
        let iban = Iban::parse("de89 3704 0044 0532 0130 00").expect("valid IBAN");
        assert_eq!(iban.as_str(), "DE89370400440532013000");
    }

    #[rstest]
    #[case("")]
    #[case("DE89")]
    #[case("1289370400440532013000")]
    #[case("DEXX370400440532013000")]
    #[case("DE89!704004405320130!0")]
    #[case("DE8937040044053201300000000000000000")]
    fn iban_rejects_malformed_structure(#[case] input: &str) {
        let err = Iban::parse(input).expect_err("malformed IBAN rejected");
        assert_eq!(err, IbanValidationError::Format);
    }

    #[rstest]
    #[case("DE00 0000 0000 0000 0000 00")]
    #[case("DE79370400440532013000")]
    #[case("DE88370400440532013000")]
    #[case("GB29NWBK60161331926818")]
    fn iban_rejects_bad_checksums(#[case] input: &str) {
        let err = Iban::parse(input).expect_err("bad checksum rejected");
        assert_eq!(err, IbanValidationError::Checksum);
    }

    #[rstest]
    #[case("DEUTDEFF", "DEUTDEFF")]
    #[case("DEUTDEFF500", "DEUTDEFF500")]
    #[case("nwbkgb2l", "NWBKGB2L")]
    #[case(" MARKDEF1100 ", "MARKDEF1100")]
    fn bic_accepts_valid_examples(#[case] input: &str, #[case] expected: &str) {
        let bic = Bic::parse(input).expect("valid BIC");
        assert_eq!(bic.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("DEUT")]
    #[case("DEUTDEFF5")]
    #[case("DEUTDEFF50012")]
    #[case("12UTDEFF")]
    #[case("DEUT12FF")]
    #[case("DEUT DEFF")]
    fn bic_rejects_invalid_patterns(#[case] input: &str) {
        let err = Bic::parse(input).expect_err("invalid BIC rejected");
        assert_eq!(err, BicValidationError);
    }

    #[rstest]
    fn draft_accepts_valid_fields() {
        let vendor_id = Uuid::new_v4();
        let draft = BankAccountDraft::try_from_parts(
            vendor_id,
            "  Operating account  ",
            "DE89 3704 0044 0532 0130 00",
            "deutdeff",
        )
        .expect("valid draft");

        assert_eq!(draft.vendor_id(), vendor_id);
        assert_eq!(draft.name(), "Operating account");
        assert_eq!(draft.iban().as_str(), "DE89370400440532013000");
        assert_eq!(draft.bic().as_str(), "DEUTDEFF");
    }

    #[rstest]
    #[case("", "DE89370400440532013000", "DEUTDEFF", BankAccountValidationError::EmptyName)]
    #[case(
        "Main",
        "DE00000000000000000000",
        "DEUTDEFF",
        BankAccountValidationError::Iban(IbanValidationError::Checksum)
    )]
    #[case(
        "Main",
        "DE89370400440532013000",
        "DEUTDEFF5",
        BankAccountValidationError::Bic(BicValidationError)
    )]
    fn draft_rejects_invalid_fields(
        #[case] name: &str,
        #[case] iban: &str,
        #[case] bic: &str,
        #[case] expected: BankAccountValidationError,
    ) {
        let err = BankAccountDraft::try_from_parts(Uuid::new_v4(), name, iban, bic)
            .expect_err("invalid draft rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn serde_rejects_invalid_wire_values() {
        let iban: Result<Iban, _> = serde_json::from_str("\"DE00000000000000000000\"");
        assert!(iban.is_err());

        let bic: Result<Bic, _> = serde_json::from_str("\"DEUT\"");
        assert!(bic.is_err());
    }

    #[rstest]
    fn serde_round_trips_normalised_forms() {
        let iban = Iban::parse("DE89 3704 0044 0532 0130 00").expect("valid IBAN");
        let json = serde_json::to_string(&iban).expect("serialise IBAN");
        assert_eq!(json, "\"DE89370400440532013000\"");

        let decoded: Iban = serde_json::from_str(&json).expect("deserialise IBAN");
        assert_eq!(decoded, iban);
    }
}
