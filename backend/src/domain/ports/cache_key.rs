//! Cache keys for read-model snapshots.
//!
//! Keys are a closed set derived from entity type and id, plus one collection
//! key per entity type. Constructors rather than free-form strings keep every
//! reader and invalidator agreeing on the exact spelling.

use std::fmt;

use uuid::Uuid;

/// Deterministic cache key for a snapshot entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Collection key for the vendor listing.
    #[must_use]
    pub fn all_vendors() -> Self {
        Self("AllVendors".to_owned())
    }

    /// Key for a single vendor snapshot.
    #[must_use]
    pub fn vendor(id: Uuid) -> Self {
        Self(format!("Vendor:{id}"))
    }

    /// Collection key for the bank account listing.
    #[must_use]
    pub fn all_bank_accounts() -> Self {
        Self("AllBankAccounts".to_owned())
    }

    /// Key for a single bank account snapshot.
    #[must_use]
    pub fn bank_account(id: Uuid) -> Self {
        Self(format!("BankAccount:{id}"))
    }

    /// Collection key for the contact person listing.
    #[must_use]
    pub fn all_contact_persons() -> Self {
        Self("AllContactPersons".to_owned())
    }

    /// Key for a single contact person snapshot.
    ///
    /// Contact person keys join type and id with an underscore; the other
    /// entity keys use a colon.
    #[must_use]
    pub fn contact_person(id: Uuid) -> Self {
        Self(format!("ContactPerson_{id}"))
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
