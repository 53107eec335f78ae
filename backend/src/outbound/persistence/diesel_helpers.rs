//! Shared helpers for Diesel repository implementations.
//!
//! Every repository speaks [`RepositoryError`], so the pool and Diesel error
//! mapping lives here once. Also carries the revision casts between the
//! database (`i32`) and domain (`u32`) representations and the interpretation
//! of a revision-guarded update that matched zero rows.

use tracing::debug;

use crate::domain::ports::{RepositoryError, UpdateOutcome};

use super::pool::PoolError;

/// Revision assigned to freshly inserted rows.
pub(crate) const INITIAL_REVISION: u32 = 1;

/// Map pool errors to the shared repository error type.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::unavailable(message)
        }
    }
}

/// Map Diesel errors to the shared repository error type.
///
/// Constraint violations keep their constraint name in the message so callers
/// can log which relation was involved; the raw database message stays at
/// debug level.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ForeignKeyViolation => RepositoryError::foreign_key(
                info.constraint_name().unwrap_or("foreign key constraint"),
            ),
            DatabaseErrorKind::UniqueViolation => {
                RepositoryError::duplicate(info.constraint_name().unwrap_or("unique constraint"))
            }
            DatabaseErrorKind::ClosedConnection => {
                RepositoryError::unavailable("database connection error")
            }
            _ => RepositoryError::query("database error"),
        },
        _ => RepositoryError::query("database error"),
    }
}

/// Cast a database revision (`i32`) to the domain representation (`u32`).
///
/// Revisions are non-negative, enforced by a database check constraint.
#[expect(
    clippy::cast_sign_loss,
    reason = "revision is always non-negative in the database"
)]
pub(crate) fn cast_revision(revision: i32) -> u32 {
    revision as u32
}

/// Cast a domain revision (`u32`) to the database representation (`i32`).
#[expect(
    clippy::cast_possible_wrap,
    reason = "revision values are small positive integers"
)]
pub(crate) fn cast_revision_for_db(revision: u32) -> i32 {
    revision as i32
}

/// Interpret the revision re-query that follows a zero-row update.
///
/// A row that still exists with a different revision is a conflict; a row
/// that no longer exists vanished between the caller's read and this write.
pub(crate) fn interpret_stale_row(current_revision: Option<i32>) -> UpdateOutcome {
    match current_revision {
        Some(actual) => UpdateOutcome::Conflict {
            actual: cast_revision(actual),
        },
        None => UpdateOutcome::Vanished,
    }
}
