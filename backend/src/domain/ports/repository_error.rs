//! Shared error and outcome types for persistence ports.
//!
//! All entity repositories speak the same failure vocabulary so services can
//! map adapter failures to API errors in one place.

use thiserror::Error;

/// Errors raised by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Connection could not be established or was lost mid-operation.
    #[error("repository unavailable: {message}")]
    Unavailable {
        /// Adapter-provided detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("repository query failed: {message}")]
    Query {
        /// Adapter-provided detail.
        message: String,
    },
    /// A referenced parent record does not exist.
    #[error("referenced record is missing: {message}")]
    ForeignKey {
        /// Adapter-provided detail.
        message: String,
    },
    /// A uniqueness constraint was violated.
    #[error("record already exists: {message}")]
    Duplicate {
        /// Adapter-provided detail.
        message: String,
    },
}

impl RepositoryError {
    /// Helper for connection oriented failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for foreign key violations.
    pub fn foreign_key(message: impl Into<String>) -> Self {
        Self::ForeignKey {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }
}

/// Result of a revision-guarded update.
///
/// Distinguishes a row that still exists with a different revision from a row
/// that vanished between the client's read and this write, so callers can
/// report a conflict in the first case and not-found in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row matched the expected revision and was rewritten.
    Updated,
    /// The row exists but carries a different revision.
    Conflict {
        /// Revision currently stored.
        actual: u32,
    },
    /// The row no longer exists.
    Vanished,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::unavailable("pool checkout timed out"), "repository unavailable: pool checkout timed out")]
    #[case(RepositoryError::query("syntax error"), "repository query failed: syntax error")]
    #[case(
        RepositoryError::foreign_key("vendor does not exist"),
        "referenced record is missing: vendor does not exist"
    )]
    #[case(
        RepositoryError::duplicate("email taken"),
        "record already exists: email taken"
    )]
    fn constructors_format_messages(#[case] error: RepositoryError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn update_outcome_distinguishes_conflict_from_vanished() {
        assert_ne!(
            UpdateOutcome::Conflict { actual: 2 },
            UpdateOutcome::Vanished
        );
        assert_eq!(
            UpdateOutcome::Conflict { actual: 2 },
            UpdateOutcome::Conflict { actual: 2 }
        );
    }
}
