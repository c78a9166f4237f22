//! Core error types for the country currency service.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use country_currency_sources::SourceError;
use thiserror::Error;

use crate::chart::ChartError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the service.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    /// An upstream provider could not be reached or answered with a failure
    /// status. Callers should retry later.
    #[error("External data source unavailable: {0}")]
    ExternalSource(SourceError),

    /// An upstream provider answered, but with a payload we cannot use.
    #[error("Unexpected upstream payload: {0}")]
    UpstreamFormat(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Chart generation failed: {0}")]
    Chart(#[from] ChartError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for caller-supplied data.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True for failures the caller can fix by retrying later.
    pub fn is_external_source(&self) -> bool {
        matches!(self, Error::ExternalSource(_))
    }
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        if err.is_unavailable() {
            Error::ExternalSource(err)
        } else {
            Error::UpstreamFormat(err.to_string())
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_names() {
        let err = ValidationError::MissingFields(vec![
            "population".to_string(),
            "currency_code".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required fields: population, currency_code"
        );
    }

    #[test]
    fn test_source_error_conversion() {
        let unavailable: Error = SourceError::UpstreamStatus {
            provider: "RESTCOUNTRIES".to_string(),
            status: 503,
        }
        .into();
        assert!(unavailable.is_external_source());

        let format: Error = SourceError::UnexpectedFormat {
            provider: "RESTCOUNTRIES".to_string(),
            message: "expected an array, got an object".to_string(),
        }
        .into();
        assert!(matches!(format, Error::UpstreamFormat(_)));
        assert!(!format.is_external_source());
    }
}
