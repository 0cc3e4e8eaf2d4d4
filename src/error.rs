//! Error types for db-bridge.
//!
//! Errors are defined with `thiserror`. `DriverError` never crosses the
//! validator or inspector boundary: both components convert it into an
//! outcome value before returning to their callers.

use crate::db::mysql::codes;
use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// A numbered driver or server error, e.g. 1045 for access denied.
    #[error("Driver error {code}: {detail}")]
    Coded { code: u16, detail: String },

    #[error("Driver '{driver}' is not supported")]
    Unsupported { driver: String },

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl DriverError {
    /// Create a numbered driver error.
    pub fn coded(code: u16, detail: impl Into<String>) -> Self {
        Self::Coded {
            code,
            detail: detail.into(),
        }
    }

    /// Create an unsupported driver error.
    pub fn unsupported(driver: impl Into<String>) -> Self {
        Self::Unsupported {
            driver: driver.into(),
        }
    }

    /// Create an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// The driver error number, if this error carries one.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Coded { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Map socket-level failures onto the MySQL client error numbers that
/// MySQL clients report for them.
fn io_error_code(err: &io::Error) -> u16 {
    match err.kind() {
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof => codes::CR_SERVER_GONE_ERROR,
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::TimedOut
        | io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable
        | io::ErrorKind::AddrNotAvailable => codes::CR_CONN_HOST_ERROR,
        _ if is_resolution_failure(err) => codes::CR_UNKNOWN_HOST,
        _ => codes::CR_CONN_HOST_ERROR,
    }
}

/// getaddrinfo failures surface as uncategorized io errors; only the text
/// identifies them.
fn is_resolution_failure(err: &io::Error) -> bool {
    let text = err.to_string().to_lowercase();
    [
        "failed to lookup address",
        "name or service not known",
        "nodename nor servname",
        "no such host",
        "temporary failure in name resolution",
    ]
    .iter()
    .any(|needle| text.contains(needle))
}

/// Convert sqlx errors to DriverError.
impl From<sqlx::Error> for DriverError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                match db_err.try_downcast_ref::<sqlx::mysql::MySqlDatabaseError>() {
                    Some(mysql_err) => {
                        DriverError::coded(mysql_err.number(), mysql_err.message())
                    }
                    None => DriverError::unexpected(db_err.message()),
                }
            }
            sqlx::Error::Io(io_err) => {
                DriverError::coded(io_error_code(&io_err), io_err.to_string())
            }
            sqlx::Error::Tls(tls_err) => {
                DriverError::unexpected(format!("TLS error: {}", tls_err))
            }
            sqlx::Error::Protocol(msg) => {
                DriverError::unexpected(format!("Protocol error: {}", msg))
            }
            sqlx::Error::Configuration(msg) => {
                DriverError::unexpected(format!("Configuration error: {}", msg))
            }
            sqlx::Error::RowNotFound => DriverError::unexpected("No rows returned"),
            sqlx::Error::ColumnDecode { index, source } => {
                DriverError::unexpected(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => {
                DriverError::unexpected(format!("Decode error: {}", source))
            }
            other => DriverError::unexpected(format!("Unknown database error: {}", other)),
        }
    }
}

/// Errors raised while assembling a connection descriptor from user input.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Connection URL {field} is not valid percent-encoded UTF-8")]
    InvalidEncoding { field: &'static str },
}

/// Result type alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DriverError::coded(1045, "Access denied for user 'root'@'localhost'");
        assert!(err.to_string().contains("1045"));
        assert!(err.to_string().contains("Access denied"));
    }

    #[test]
    fn test_error_code() {
        assert_eq!(DriverError::coded(2003, "refused").code(), Some(2003));
        assert_eq!(DriverError::unexpected("boom").code(), None);
        assert_eq!(DriverError::unsupported("Oracle").code(), None);
    }

    #[test]
    fn test_refused_maps_to_conn_host_error() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        let err = DriverError::from(sqlx::Error::Io(io_err));
        assert_eq!(err.code(), Some(codes::CR_CONN_HOST_ERROR));
    }

    #[test]
    fn test_reset_maps_to_server_gone() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer");
        let err = DriverError::from(sqlx::Error::Io(io_err));
        assert_eq!(err.code(), Some(codes::CR_SERVER_GONE_ERROR));
    }

    #[test]
    fn test_lookup_failure_maps_to_unknown_host() {
        let io_err =
            io::Error::other("failed to lookup address information: Name or service not known");
        let err = DriverError::from(sqlx::Error::Io(io_err));
        assert_eq!(err.code(), Some(codes::CR_UNKNOWN_HOST));
    }

    #[test]
    fn test_protocol_error_is_unexpected() {
        let err = DriverError::from(sqlx::Error::Protocol("bad packet".to_string()));
        assert!(matches!(err, DriverError::Unexpected { .. }));
    }

    #[test]
    fn test_row_not_found_is_unexpected() {
        let err = DriverError::from(sqlx::Error::RowNotFound);
        assert_eq!(err, DriverError::unexpected("No rows returned"));
    }
}
