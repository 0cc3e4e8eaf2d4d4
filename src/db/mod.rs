//! Database access layer.
//!
//! This module provides:
//! - The `Connector` / `Session` driver seam
//! - The MySQL-family driver
//! - Error classification tables keyed by driver kind
//! - Connection validation
//! - Schema introspection

pub mod client;
pub mod error_catalog;
pub mod mysql;
pub mod schema;
pub mod validator;

pub use client::{Connector, Session};
pub use error_catalog::{ErrorCatalog, ErrorTable};
pub use mysql::{MySqlConnector, MySqlSession};
pub use schema::SchemaInspector;
pub use validator::ConnectionValidator;
