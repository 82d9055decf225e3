use serde_json::{Map, Value};

use super::keys::{PARTITION_KEY, SORT_KEY};
use super::{Result, StorageError};

/// A stored row: every attribute, including the `pk`/`sk` key attributes.
pub type Row = Map<String, Value>;

/// The (partition key, sort key) pair addressing exactly one row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimaryKey {
    pub pk: String,
    pub sk: String,
}

impl PrimaryKey {
    pub fn new(pk: impl Into<String>, sk: impl Into<String>) -> Self {
        Self {
            pk: pk.into(),
            sk: sk.into(),
        }
    }

    /// Reads the key attributes out of a row.
    pub fn of_row(row: &Row) -> Result<Self> {
        Ok(Self {
            pk: key_attribute(row, PARTITION_KEY)?.to_string(),
            sk: key_attribute(row, SORT_KEY)?.to_string(),
        })
    }
}

fn key_attribute<'a>(row: &'a Row, name: &str) -> Result<&'a str> {
    row.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| StorageError::InvalidData(format!("Missing or invalid field: {name}")))
}

/// Direction of a sort-key ordered read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Row predicate for full-table scans.
///
/// Kept to what a store can evaluate server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFilter {
    SortKeyBeginsWith(String),
}

impl ScanFilter {
    /// Returns true if the row passes the filter.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            ScanFilter::SortKeyBeginsWith(prefix) => row
                .get(SORT_KEY)
                .and_then(Value::as_str)
                .is_some_and(|sk| sk.starts_with(prefix.as_str())),
        }
    }
}
