//! Shared Diesel and pool error mapping for the user repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{DuplicateField, UserPersistenceError};

use super::pool::PoolError;

/// Map pool failures to connection errors.
pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    UserPersistenceError::connection(message)
}

/// Map Diesel failures to persistence errors.
///
/// Unique violations become [`UserPersistenceError::DuplicateKey`], keyed on
/// the constraint that fired; this is the write-time guard that closes the
/// race between two registrations submitting the same username or email.
pub(super) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(
            error_type = %std::any::type_name_of_val(other),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let field = match info.constraint_name() {
                Some(name) if name.contains("email") => DuplicateField::Email,
                _ => DuplicateField::Username,
            };
            UserPersistenceError::duplicate_key(field)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        _ => UserPersistenceError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_failures() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(
            mapped,
            UserPersistenceError::connection("timed out")
        );
    }

    #[rstest]
    fn not_found_maps_to_a_query_error() {
        let mapped = map_diesel_error(DieselError::NotFound);
        assert_eq!(mapped, UserPersistenceError::query("record not found"));
    }
}
