//! Error types for sqlconn

use thiserror::Error;

/// Result type alias for sqlconn operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the database or mapping its results
#[derive(Error, Debug)]
pub enum Error {
    /// Failure to open, use or close the physical connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server rejected the command (syntax, constraint, permission, ...)
    #[error("Execution error: {0}")]
    Execution(String),

    /// The command did not finish within the configured timeout
    #[error("Command timed out after {seconds} seconds")]
    Timeout { seconds: u32 },

    /// A named field or ordinal that the current row does not have
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// A required argument was missing or malformed
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A column could not be mapped onto a struct field
    #[error("Failed to map column `{column}`: {reason}")]
    Mapping { column: String, reason: String },

    /// Type conversion error
    #[error("Type conversion error: expected {expected}, got {actual}")]
    TypeConversion {
        expected: &'static str,
        actual: String,
    },

    /// `begin_transaction` while another transaction is still open
    #[error("A transaction is already active on this connection")]
    TransactionActive,

    /// Settings could not be loaded or are invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Wrap a conversion failure with the column it happened on.
    pub fn mapping(column: impl Into<String>, source: Error) -> Self {
        Error::Mapping {
            column: column.into(),
            reason: source.to_string(),
        }
    }

    /// True for errors after which the physical connection can no longer be trusted.
    pub fn is_connection_fault(&self) -> bool {
        matches!(self, Error::Connection(_) | Error::Timeout { .. })
    }
}

impl From<mysql_async::Error> for Error {
    fn from(err: mysql_async::Error) -> Self {
        match err {
            mysql_async::Error::Server(e) => Error::Execution(e.to_string()),
            other => Error::Connection(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_keeps_column_and_reason() {
        let err = Error::mapping(
            "Age",
            Error::TypeConversion {
                expected: "i32",
                actual: "text".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Failed to map column `Age`: Type conversion error: expected i32, got text"
        );
    }

    #[test]
    fn test_connection_faults() {
        assert!(Error::Timeout { seconds: 1 }.is_connection_fault());
        assert!(Error::Connection("reset".into()).is_connection_fault());
        assert!(!Error::Execution("syntax".into()).is_connection_fault());
    }
}
