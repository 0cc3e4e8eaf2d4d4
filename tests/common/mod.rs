//! Scripted in-memory driver shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use db_bridge::db::{Connector, Session};
use db_bridge::error::{DriverError, DriverResult};
use db_bridge::models::{ConnectionDescriptor, DriverKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct Counters {
    pub connects: AtomicUsize,
    pub closes: AtomicUsize,
    pub database_lists: AtomicUsize,
    pub table_lists: AtomicUsize,
    /// Database each connection was scoped to
    pub scopes: Mutex<Vec<Option<String>>>,
}

/// A fake server whose responses are scripted up front.
#[derive(Debug, Clone, Default)]
pub struct FakeServer {
    databases: Vec<String>,
    tables: Vec<(String, DriverResult<u64>)>,
    connect_error: Option<DriverError>,
    list_error: Option<DriverError>,
    pub counters: Arc<Counters>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_databases(mut self, names: &[&str]) -> Self {
        self.databases = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_table(mut self, name: &str, rows: u64) -> Self {
        self.tables.push((name.to_string(), Ok(rows)));
        self
    }

    /// A table whose row count query fails.
    pub fn with_broken_table(mut self, name: &str, err: DriverError) -> Self {
        self.tables.push((name.to_string(), Err(err)));
        self
    }

    /// Every connection attempt fails with `err`.
    pub fn refusing(mut self, err: DriverError) -> Self {
        self.connect_error = Some(err);
        self
    }

    /// Connections succeed but listing databases or tables fails.
    pub fn failing_listings(mut self, err: DriverError) -> Self {
        self.list_error = Some(err);
        self
    }

    pub fn connects(&self) -> usize {
        self.counters.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.counters.closes.load(Ordering::SeqCst)
    }

    pub fn database_lists(&self) -> usize {
        self.counters.database_lists.load(Ordering::SeqCst)
    }

    pub fn scopes(&self) -> Vec<Option<String>> {
        self.counters.scopes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for FakeServer {
    type Session = FakeSession;

    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
        _timeout: Duration,
    ) -> DriverResult<FakeSession> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        self.counters
            .scopes
            .lock()
            .unwrap()
            .push(descriptor.database().map(String::from));

        match &self.connect_error {
            Some(err) => Err(err.clone()),
            None => Ok(FakeSession {
                server: self.clone(),
            }),
        }
    }
}

pub struct FakeSession {
    server: FakeServer,
}

#[async_trait]
impl Session for FakeSession {
    async fn list_databases(&mut self) -> DriverResult<Vec<String>> {
        self.server
            .counters
            .database_lists
            .fetch_add(1, Ordering::SeqCst);
        match &self.server.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.server.databases.clone()),
        }
    }

    async fn list_tables(&mut self) -> DriverResult<Vec<String>> {
        self.server.counters.table_lists.fetch_add(1, Ordering::SeqCst);
        match &self.server.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.server.tables.iter().map(|(n, _)| n.clone()).collect()),
        }
    }

    async fn count_rows(&mut self, table: &str) -> DriverResult<u64> {
        self.server
            .tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_else(|| {
                Err(DriverError::coded(
                    1146,
                    format!("Table '{}' doesn't exist", table),
                ))
            })
    }

    async fn close(self) {
        self.server.counters.closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn mysql(database: &str) -> ConnectionDescriptor {
    ConnectionDescriptor::new(DriverKind::MySql, "localhost", 3306, "root", "secret", database)
}
