//! Shared error mapping from pool and Diesel failures to port errors.
//!
//! Each repository port defines its own error enum, so the helpers here take
//! constructor closures rather than a concrete error type. Unique-violation
//! cases with dedicated variants (duplicate email, zpid, favourite) are
//! matched in the repositories before falling back to these helpers.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
pub(crate) fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(String) -> E,
    C: Fn(String) -> E,
{
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
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        other => query(other.to_string()),
    }
}

/// Whether a Diesel error is a unique violation touching `column`.
///
/// Matches either the constraint name or the reported message so both
/// named constraints and ad-hoc unique indexes are recognised.
pub(crate) fn is_unique_violation_on(error: &diesel::result::Error, column: &str) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name()
                .is_some_and(|name| name.contains(column))
                || info.message().contains(column)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let mapped = map_diesel_error(
            diesel::result::Error::NotFound,
            Mapped::Query,
            Mapped::Connection,
        );
        assert_eq!(mapped, Mapped::Query("record not found".to_owned()));
    }

    #[rstest]
    fn rollback_maps_to_query() {
        let mapped = map_diesel_error(
            diesel::result::Error::RollbackTransaction,
            Mapped::Query,
            Mapped::Connection,
        );
        assert!(matches!(mapped, Mapped::Query(_)));
    }

    #[rstest]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation_on(
            &diesel::result::Error::NotFound,
            "zpid"
        ));
    }
}
