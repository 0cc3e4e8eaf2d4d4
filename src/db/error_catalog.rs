//! Driver error classification.
//!
//! Each driver kind owns a table mapping driver error numbers to fixed,
//! human-readable messages. Adding a backend means registering a table.

use crate::db::mysql::codes;
use crate::error::DriverError;
use crate::models::{ConnectionFailure, DriverKind, FailureKind};
use std::collections::HashMap;

pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred. Check the connection details and try again.";

/// Fixed messages for one driver's error numbers.
#[derive(Debug, Clone, Default)]
pub struct ErrorTable {
    messages: HashMap<u16, String>,
}

impl ErrorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the message for `code`.
    pub fn with(mut self, code: u16, message: impl Into<String>) -> Self {
        self.messages.insert(code, message.into());
        self
    }

    pub fn get(&self, code: u16) -> Option<&str> {
        self.messages.get(&code).map(String::as_str)
    }

    /// Messages for the MySQL-family error numbers users hit while connecting.
    pub fn mysql() -> Self {
        Self::new()
            .with(
                codes::ER_ACCESS_DENIED_ERROR,
                "Connection failed: incorrect username or password.",
            )
            .with(
                codes::ER_BAD_DB_ERROR,
                "Connection failed: the database does not exist.",
            )
            .with(
                codes::CR_CONN_HOST_ERROR,
                "Connection failed: cannot reach the host. Check the server address and port.",
            )
            .with(
                codes::CR_UNKNOWN_HOST,
                "Connection failed: invalid host name.",
            )
            .with(
                codes::CR_SERVER_GONE_ERROR,
                "Connection failed: the server closed the connection.",
            )
            .with(
                codes::ER_HOST_NOT_PRIVILEGED,
                "Connection failed: this host is not allowed to connect to the database server.",
            )
    }
}

/// Error tables keyed by driver kind.
#[derive(Debug, Clone)]
pub struct ErrorCatalog {
    tables: HashMap<DriverKind, ErrorTable>,
}

impl ErrorCatalog {
    /// An empty catalog: every coded error falls back to its raw detail.
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Register (or replace) the table for `driver`.
    pub fn register(&mut self, driver: DriverKind, table: ErrorTable) {
        self.tables.insert(driver, table);
    }

    pub fn with_table(mut self, driver: DriverKind, table: ErrorTable) -> Self {
        self.register(driver, table);
        self
    }

    pub fn table(&self, driver: &DriverKind) -> Option<&ErrorTable> {
        self.tables.get(driver)
    }

    /// Classify a driver error into a failure carrying a friendly message.
    ///
    /// Known codes get their fixed message regardless of the detail text.
    /// Unknown codes embed the detail. Anything else is reported with an
    /// opaque generic message.
    pub fn classify(&self, driver: &DriverKind, err: &DriverError) -> ConnectionFailure {
        match err {
            DriverError::Coded { code, detail } => {
                match self.table(driver).and_then(|table| table.get(*code)) {
                    Some(message) => ConnectionFailure {
                        kind: FailureKind::Classified,
                        code: Some(*code),
                        message: message.to_string(),
                    },
                    None => ConnectionFailure {
                        kind: FailureKind::Unclassified,
                        code: Some(*code),
                        message: format!("Connection failed: {}", detail),
                    },
                }
            }
            DriverError::Unsupported { .. } | DriverError::Unexpected { .. } => {
                ConnectionFailure {
                    kind: FailureKind::Unexpected,
                    code: None,
                    message: UNEXPECTED_ERROR_MESSAGE.to_string(),
                }
            }
        }
    }
}

impl Default for ErrorCatalog {
    fn default() -> Self {
        let mysql = ErrorTable::mysql();
        Self::empty()
            .with_table(DriverKind::MariaDb, mysql.clone())
            .with_table(DriverKind::MySql, mysql)
    }
}
