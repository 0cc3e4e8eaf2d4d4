//! Driver seam.
//!
//! The validator and the inspector talk to the server only through these
//! traits. A `Connector` opens one exclusively owned `Session` per
//! operation; the session is closed by the operation that opened it.

use crate::error::DriverResult;
use crate::models::ConnectionDescriptor;
use async_trait::async_trait;
use std::time::Duration;

/// Opens connections for a driver family.
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: Session;

    /// Open a connection to the descriptor's target. When the descriptor has
    /// no database the connection is scoped to the server only.
    ///
    /// `timeout` bounds the connect step only, not later queries.
    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
        timeout: Duration,
    ) -> DriverResult<Self::Session>;
}

/// A single open connection.
#[async_trait]
pub trait Session: Send {
    /// Database names in server-reported order.
    async fn list_databases(&mut self) -> DriverResult<Vec<String>>;

    /// Table names of the current database in server-reported order.
    async fn list_tables(&mut self) -> DriverResult<Vec<String>>;

    async fn count_rows(&mut self, table: &str) -> DriverResult<u64>;

    /// Release the connection. Errors while closing are logged, not returned.
    async fn close(self);
}
