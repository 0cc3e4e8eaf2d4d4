//! Schema-related data models.
//!
//! This module defines types for table introspection results.

use serde::Serialize;

/// Number of rows in a table, or `Unknown` when counting that table failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowCount {
    Known(u64),
    Unknown,
}

impl RowCount {
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The count, if known.
    pub fn get(&self) -> Option<u64> {
        match self {
            Self::Known(n) => Some(*n),
            Self::Unknown => None,
        }
    }
}

impl From<Option<u64>> for RowCount {
    fn from(count: Option<u64>) -> Self {
        count.map_or(Self::Unknown, Self::Known)
    }
}

impl std::fmt::Display for RowCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(n) => write!(f, "{}", n),
            Self::Unknown => f.write_str("?"),
        }
    }
}

/// One table as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub name: String,
    /// `null` in JSON when unknown
    pub row_count: RowCount,
}

impl TableInfo {
    /// Create a new table info.
    pub fn new(name: impl Into<String>, row_count: RowCount) -> Self {
        Self {
            name: name.into(),
            row_count,
        }
    }

    /// Create a table info whose row count could not be determined.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::new(name, RowCount::Unknown)
    }
}
