//! Schema introspection module.
//!
//! Lists the tables of the descriptor's database together with a row count
//! for each. A failed count marks only that table's count as unknown.
//! Tables are only loaded for a descriptor whose connection validated
//! against a specific database.

use crate::config::DEFAULT_CONNECT_TIMEOUT_SECS;
use crate::db::client::{Connector, Session};
use crate::db::validator::ConnectionValidator;
use crate::error::{DriverError, DriverResult};
use crate::models::{ConnectionDescriptor, ConnectionOutcome, RowCount, TableInfo};
use std::time::Duration;
use tracing::{debug, warn};

/// Schema inspector for table introspection.
pub struct SchemaInspector<C> {
    connector: C,
    connect_timeout: Duration,
}

impl<C: Connector> SchemaInspector<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Validate the descriptor first and list its tables only when the
    /// connection succeeded against a database.
    ///
    /// Any other outcome (unsupported driver, server-level connection or a
    /// failure) is handed back untouched so the caller can report it.
    pub async fn list_validated_tables<V: Connector>(
        &self,
        validator: &ConnectionValidator<V>,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Vec<TableInfo>, ConnectionOutcome> {
        match validator.validate(descriptor).await {
            ConnectionOutcome::Connected { .. } => Ok(self.list_tables(descriptor).await),
            outcome => {
                debug!(status = ?outcome, "Skipping table listing");
                Err(outcome)
            }
        }
    }

    /// List tables with row counts, in server-reported order.
    ///
    /// Any connection-level failure yields an empty list.
    pub async fn list_tables(&self, descriptor: &ConnectionDescriptor) -> Vec<TableInfo> {
        match self.try_list_tables(descriptor).await {
            Ok(tables) => tables,
            Err(err) => {
                warn!(
                    host = %descriptor.host,
                    database = ?descriptor.database(),
                    error = %err,
                    "Failed to load tables"
                );
                Vec::new()
            }
        }
    }

    /// Like [`SchemaInspector::list_tables`], but reports why the listing failed.
    pub async fn try_list_tables(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> DriverResult<Vec<TableInfo>> {
        if !descriptor.driver.is_mysql_family() {
            return Err(DriverError::unsupported(descriptor.driver.display_name()));
        }

        let mut session = self
            .connector
            .connect(descriptor, self.connect_timeout)
            .await?;

        let result = collect_tables(&mut session).await;

        session.close().await;
        result
    }
}

async fn collect_tables<S: Session>(session: &mut S) -> DriverResult<Vec<TableInfo>> {
    let names = session.list_tables().await?;
    let mut tables = Vec::with_capacity(names.len());

    for name in names {
        let row_count = match session.count_rows(&name).await {
            Ok(count) => RowCount::Known(count),
            Err(err) => {
                warn!(table = %name, error = %err, "Failed to count rows");
                RowCount::Unknown
            }
        };
        tables.push(TableInfo { name, row_count });
    }

    debug!(count = tables.len(), "Collected tables");
    Ok(tables)
}
