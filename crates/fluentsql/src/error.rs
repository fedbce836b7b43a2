//! `StmtError`: everything that can go wrong between building a statement and
//! reading its rows back.
//!
//! Driver failures are classified once, in [`StmtError::from_db_error`];
//! statement builders never inspect errors themselves.

use thiserror::Error;

pub type StmtResult<T> = Result<T, StmtError>;

#[derive(Debug, Error)]
pub enum StmtError {
    /// The session could not reach the server (I/O, TLS, closed connection).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server rejected the statement; also covers malformed SQL, which is
    /// never validated locally.
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate key (MySQL 1062), formatted as `constraint: message`.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// A column value could not be converted to the requested Rust type.
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Misuse of session state, e.g. COMMIT with no open transaction.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Other(String),
}

impl StmtError {
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Classify a driver error.
    ///
    /// Transport failures become [`Connection`](Self::Connection), constraint
    /// failures their dedicated variants; everything else stays a
    /// [`Query`](Self::Query) carrying the original `sqlx::Error`.
    pub fn from_db_error(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::WorkerCrashed => {
                return Self::Connection(err.to_string());
            }
            sqlx::Error::RowNotFound => return Self::NotFound(err.to_string()),
            _ => {}
        }

        let Some(db_err) = err.as_database_error() else {
            return Self::Query(err);
        };
        let detail = format!(
            "{}: {}",
            db_err.constraint().unwrap_or("unknown"),
            db_err.message()
        );
        if db_err.is_unique_violation() {
            Self::UniqueViolation(detail)
        } else if db_err.is_foreign_key_violation() {
            Self::ForeignKeyViolation(detail)
        } else if db_err.is_check_violation() {
            Self::CheckViolation(detail)
        } else {
            Self::Query(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = StmtError::from_db_error(sqlx::Error::RowNotFound);
        assert!(err.is_not_found());
    }

    #[test]
    fn transport_failures_map_to_connection() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = StmtError::from_db_error(sqlx::Error::Io(io));
        assert!(matches!(err, StmtError::Connection(_)));

        let err = StmtError::from_db_error(sqlx::Error::WorkerCrashed);
        assert!(matches!(err, StmtError::Connection(_)));
    }

    #[test]
    fn other_driver_errors_stay_query() {
        let err = StmtError::from_db_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StmtError::Query(sqlx::Error::PoolTimedOut)));
    }

    #[test]
    fn decode_error_names_the_column() {
        let err = StmtError::decode("age", "expected integer");
        assert_eq!(
            err.to_string(),
            "Decode error on column 'age': expected integer"
        );
    }
}
