//! Error translation shared by the Diesel repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub(crate) fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Extract a readable message from a Diesel error and emit debug context.
pub(crate) fn map_diesel_error_message(error: DieselError, operation: &str) -> String {
    log_diesel_error(&error, operation);
    error.to_string()
}

/// Debug-log a failed statement with its constraint, when the store names one.
pub(crate) fn log_diesel_error(error: &DieselError, operation: &str) {
    if let DieselError::DatabaseError(kind, info) = error {
        debug!(?kind, constraint = info.constraint_name(), %operation, "diesel operation failed");
    } else {
        debug!(%error, %operation, "diesel operation failed");
    }
}

/// Whether the store rejected a write because a referenced row is missing.
pub(crate) fn is_foreign_key_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

/// Whether the connection dropped underneath the query.
pub(crate) fn is_closed_connection(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
    )
}
