use std::fmt::Display;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::repositories::StoreError;

/// Utility for classifying Diesel and pool failures as [`StoreError`]s.
///
/// Only `DieselError::NotFound` maps to `StoreError::NotFound`; every other
/// failure is a backend error carrying the operation for logging.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error into a storage outcome.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> StoreError {
        match error {
            DieselError::NotFound => StoreError::NotFound,
            DieselError::DatabaseError(kind, info) => StoreError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(Self::describe_database_error(
                    kind,
                    info.message(),
                    info.constraint_name(),
                )),
            },
            other => StoreError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    /// Converts a connection pool failure into a storage outcome.
    pub fn convert_pool_error(error: impl Display) -> StoreError {
        StoreError::Pool {
            source: anyhow::Error::msg(error.to_string()),
        }
    }

    fn describe_database_error(
        kind: DatabaseErrorKind,
        message: &str,
        constraint_name: Option<&str>,
    ) -> String {
        let label = match kind {
            DatabaseErrorKind::UniqueViolation => "Unique constraint violation",
            DatabaseErrorKind::NotNullViolation => "Not null constraint violation",
            DatabaseErrorKind::CheckViolation => "Check constraint violation",
            DatabaseErrorKind::ForeignKeyViolation => "Foreign key constraint violation",
            DatabaseErrorKind::ClosedConnection => "Connection closed",
            _ => "Database error",
        };

        match constraint_name {
            Some(constraint) => format!("{label} ({constraint}): {message}"),
            None => format!("{label}: {message}"),
        }
    }
}
