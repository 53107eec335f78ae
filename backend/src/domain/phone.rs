//! Phone number value type with E.164-style validation and normalisation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`PhoneNumber::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneValidationError {
    /// Input was empty or whitespace-only.
    Empty,
    /// Input does not begin with `+`.
    MissingLeadingPlus,
    /// The digits do not form a plausible international number.
    InvalidDigits,
}

impl fmt::Display for PhoneValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "phone number must not be empty"),
            Self::MissingLeadingPlus => write!(f, "phone number must start with +"),
            Self::InvalidDigits => {
                write!(f, "phone number digits do not form a valid international number")
            }
        }
    }
}

impl std::error::Error for PhoneValidationError {}

/// Shortest plausible international number: country code plus subscriber digit.
pub const PHONE_DIGITS_MIN: usize = 2;
/// E.164 caps international numbers at fifteen digits.
pub const PHONE_DIGITS_MAX: usize = 15;

/// International phone number stored in normalised form.
///
/// Normalisation strips every character except digits and the leading `+`, so
/// `+49 (0)30-901820` is stored as `+49030901820`. The stored form is what
/// gets persisted and returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate, normalise, and construct a [`PhoneNumber`].
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PhoneValidationError> {
        let raw = input.as_ref().trim();
        if raw.is_empty() {
            return Err(PhoneValidationError::Empty);
        }
        if !raw.starts_with('+') {
            return Err(PhoneValidationError::MissingLeadingPlus);
        }

        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let count = digits.chars().count();
        if !(PHONE_DIGITS_MIN..=PHONE_DIGITS_MAX).contains(&count) {
            return Err(PhoneValidationError::InvalidDigits);
        }
        if digits.starts_with('0') {
            return Err(PhoneValidationError::InvalidDigits);
        }

        Ok(Self(format!("+{digits}")))
    }

    /// Borrow the normalised number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        let PhoneNumber(raw) = value;
        raw
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
