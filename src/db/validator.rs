//! Connection validation.
//!
//! Attempts a connection described by a `ConnectionDescriptor` and reports
//! the result as a `ConnectionOutcome`:
//! - non MySQL-family drivers are not attempted
//! - with a database, the connection is scoped to it
//! - without one, the server's database list is returned
//!
//! Every failure is classified through the `ErrorCatalog`; nothing is
//! returned to the caller as an error.

use crate::config::DEFAULT_CONNECT_TIMEOUT_SECS;
use crate::db::client::{Connector, Session};
use crate::db::error_catalog::ErrorCatalog;
use crate::error::DriverResult;
use crate::models::{ConnectionDescriptor, ConnectionOutcome};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Validates connection descriptors against a live server.
pub struct ConnectionValidator<C> {
    connector: C,
    catalog: ErrorCatalog,
    connect_timeout: Duration,
}

impl<C: Connector> ConnectionValidator<C> {
    /// Create a validator with the default error catalog and connect timeout.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            catalog: ErrorCatalog::default(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_catalog(mut self, catalog: ErrorCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Validate a descriptor.
    pub async fn validate(&self, descriptor: &ConnectionDescriptor) -> ConnectionOutcome {
        if !descriptor.driver.is_mysql_family() {
            info!(driver = %descriptor.driver, "Driver not supported, skipping connection attempt");
            return ConnectionOutcome::Unsupported {
                driver: descriptor.driver.display_name().to_string(),
            };
        }

        match self.attempt(descriptor).await {
            Ok(outcome) => {
                info!(
                    host = %descriptor.host,
                    port = descriptor.port,
                    database = ?descriptor.database(),
                    "Connection validated"
                );
                outcome
            }
            Err(err) => {
                let failure = self.catalog.classify(&descriptor.driver, &err);
                warn!(
                    host = %descriptor.host,
                    port = descriptor.port,
                    code = ?failure.code,
                    kind = ?failure.kind,
                    error = %err,
                    "Connection validation failed"
                );
                ConnectionOutcome::Failed(failure)
            }
        }
    }

    async fn attempt(&self, descriptor: &ConnectionDescriptor) -> DriverResult<ConnectionOutcome> {
        let mut session = self
            .connector
            .connect(descriptor, self.connect_timeout)
            .await?;

        let result = match descriptor.database() {
            Some(database) => Ok(ConnectionOutcome::Connected {
                database: database.to_string(),
            }),
            None => session
                .list_databases()
                .await
                .map(|databases| ConnectionOutcome::ConnectedNoDatabase { databases }),
        };

        // Close regardless of what the query returned
        session.close().await;
        debug!("Validation connection closed");

        result
    }
}
