//! User accounts and role assignments.
//!
//! Accounts are the login identities behind the API. The mail address doubles
//! as the login name, so it is validated and normalised here rather than
//! treated as free text like vendor contact fields.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors returned by account constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Mail address was missing or blank once trimmed.
    EmptyEmail,
    /// Mail address does not look like `local@domain.tld`.
    InvalidEmail,
    /// Password is shorter than [`PASSWORD_MIN`] characters.
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like local@domain.tld"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Minimum accepted password length for new accounts.
pub const PASSWORD_MIN: usize = 8;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately loose: one @, no whitespace, dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Login mail address stored trimmed and lower-cased.
///
/// Lower-casing at the boundary makes login lookups and the unique constraint
/// case-insensitive without collation tricks in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate, normalise, and construct an [`EmailAddress`].
    pub fn parse(input: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(AccountValidationError::InvalidEmail);
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Borrow the normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Access role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including deletes and user management.
    Admin,
    /// Create, read, and update on vendor data; no deletes, no user management.
    Manager,
}

impl Role {
    /// Returns the storage and claim string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.input)
    }
}

impl std::error::Error for ParseRoleError {}

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            _ => Err(ParseRoleError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Persisted user account.
///
/// ## Invariants
/// - `email` is unique among accounts and already normalised.
/// - `password_hash` holds a salted hash, never a plaintext password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    email: EmailAddress,
    password_hash: String,
    roles: Vec<Role>,
}

impl User {
    /// Build a [`User`] from already-validated components.
    pub fn new(id: Uuid, email: EmailAddress, password_hash: String, roles: Vec<Role>) -> Self {
        Self {
            id,
            email,
            password_hash,
            roles,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Login mail address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Salted password hash in PHC string format.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Roles granted to the account.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}

/// Validated inputs for creating a user account.
///
/// Holds the plaintext password only until a credential hasher consumes it;
/// the buffer is zeroed on drop.
#[derive(Debug, Clone)]
pub struct NewUser {
    email: EmailAddress,
    password: Zeroizing<String>,
    roles: Vec<Role>,
}

impl NewUser {
    /// Construct from raw email and password inputs plus parsed roles.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        roles: Vec<Role>,
    ) -> Result<Self, AccountValidationError> {
        let email = EmailAddress::parse(email)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(AccountValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
            roles,
        })
    }

    /// Normalised login mail address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Roles to grant.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}
