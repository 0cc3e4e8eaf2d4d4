//! Data models for db-bridge.
//!
//! This module re-exports all model types used throughout the crate.

pub mod connection;
pub mod schema;

// Re-export commonly used types
pub use connection::{
    ConnectionDescriptor, ConnectionFailure, ConnectionOutcome, ConnectionStatus, DriverKind,
    FailureKind,
};
pub use schema::{RowCount, TableInfo};
