//! DB Bridge Library
//!
//! This library validates MySQL-family database connections and introspects
//! the tables of a database together with their row counts.

pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod models;

pub use config::Config;
pub use db::{ConnectionValidator, ErrorCatalog, MySqlConnector, SchemaInspector};
pub use error::DriverError;
pub use models::{ConnectionDescriptor, ConnectionOutcome, ConnectionStatus, TableInfo};
