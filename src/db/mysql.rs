//! MySQL-family driver built on sqlx.
//!
//! One `MySqlConnection` per operation, no pooling. MariaDB uses the same
//! protocol and error numbers.

use crate::db::client::{Connector, Session};
use crate::error::{DriverError, DriverResult};
use crate::models::ConnectionDescriptor;
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{ConnectOptions, Connection, Row};
use std::time::Duration;
use tracing::{debug, warn};

/// MySQL server (`ER_*`) and client (`CR_*`) error numbers.
pub mod codes {
    pub const ER_ACCESS_DENIED_ERROR: u16 = 1045;
    pub const ER_BAD_DB_ERROR: u16 = 1049;
    pub const ER_HOST_NOT_PRIVILEGED: u16 = 1130;
    pub const CR_CONN_HOST_ERROR: u16 = 2003;
    pub const CR_UNKNOWN_HOST: u16 = 2005;
    pub const CR_SERVER_GONE_ERROR: u16 = 2006;
}

mod queries {
    pub const LIST_DATABASES: &str = "SHOW DATABASES";
    pub const LIST_TABLES: &str = "SHOW TABLES";
}

/// Quote a MySQL identifier, doubling any embedded backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Safely get a string from a MySQL row by index.
/// SHOW statements may return VARBINARY instead of VARCHAR depending on charset configuration.
fn get_string_by_index(row: &MySqlRow, index: usize) -> Option<String> {
    row.try_get::<String, _>(index).ok().or_else(|| {
        row.try_get::<Vec<u8>, _>(index)
            .ok()
            .map(|bytes| name_from_bytes(&bytes))
    })
}

/// Names in a non-UTF-8 charset are kept, with invalid sequences replaced.
fn name_from_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

impl MySqlConnector {
    pub fn new() -> Self {
        Self
    }

    fn connect_options(descriptor: &ConnectionDescriptor) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&descriptor.host)
            .port(descriptor.port)
            .username(&descriptor.username)
            .password(&descriptor.password);

        match descriptor.database() {
            Some(database) => options.database(database),
            None => options,
        }
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    type Session = MySqlSession;

    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
        timeout: Duration,
    ) -> DriverResult<MySqlSession> {
        if !descriptor.driver.is_mysql_family() {
            return Err(DriverError::unsupported(descriptor.driver.display_name()));
        }

        debug!(
            host = %descriptor.host,
            port = descriptor.port,
            database = ?descriptor.database(),
            timeout_secs = timeout.as_secs(),
            "Opening MySQL connection"
        );

        let options = Self::connect_options(descriptor);
        let conn = tokio::time::timeout(timeout, options.connect())
            .await
            .map_err(|_| {
                DriverError::coded(
                    codes::CR_CONN_HOST_ERROR,
                    format!(
                        "Can't connect to MySQL server on '{}' (timed out)",
                        descriptor.host
                    ),
                )
            })??;

        Ok(MySqlSession { conn })
    }
}

pub struct MySqlSession {
    conn: MySqlConnection,
}

impl MySqlSession {
    async fn fetch_names(&mut self, sql: &str) -> DriverResult<Vec<String>> {
        let rows = sqlx::query(sql).fetch_all(&mut self.conn).await?;
        let mut names = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            match get_string_by_index(row, 0) {
                Some(name) => names.push(name),
                None => warn!(sql, row = index, "Skipping row without a readable name"),
            }
        }
        Ok(names)
    }
}

#[async_trait]
impl Session for MySqlSession {
    async fn list_databases(&mut self) -> DriverResult<Vec<String>> {
        let databases = self.fetch_names(queries::LIST_DATABASES).await?;
        debug!(count = databases.len(), "Listed MySQL databases");
        Ok(databases)
    }

    async fn list_tables(&mut self) -> DriverResult<Vec<String>> {
        let tables = self.fetch_names(queries::LIST_TABLES).await?;
        debug!(count = tables.len(), "Listed MySQL tables");
        Ok(tables)
    }

    async fn count_rows(&mut self, table: &str) -> DriverResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&mut self.conn).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn close(self) {
        if let Err(err) = self.conn.close().await {
            debug!(error = %err, "Error while closing MySQL connection");
        }
    }
}
