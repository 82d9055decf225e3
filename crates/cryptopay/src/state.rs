//! Application state.
//!
//! Holds the one storage table handle, created at startup and shared by
//! every request.

use std::sync::Arc;

use cryptopay_core::storage::Table;

use crate::config::Config;

/// Shared application state.
///
/// Cloned for each request handler; clones share the same table.
#[derive(Clone)]
pub struct AppState {
    table: Arc<dyn Table>,
}

impl AppState {
    pub fn new(table: Arc<dyn Table>) -> Self {
        Self { table }
    }

    /// Opens the table selected by the enabled storage feature.
    #[cfg(feature = "inmemory")]
    pub async fn from_config(config: &Config) -> Self {
        use crate::storage::inmemory::InMemoryTable;

        tracing::info!(table = %config.table_name, "Using in-memory storage");
        Self::new(Arc::new(InMemoryTable::new()))
    }

    /// Opens the table selected by the enabled storage feature.
    #[cfg(feature = "dynamodb")]
    pub async fn from_config(config: &Config) -> Self {
        use crate::storage::dynamodb::DynamoDbTable;

        let table = DynamoDbTable::connect(config.table_name.clone()).await;
        tracing::info!(table = %table.table_name(), "Using DynamoDB storage");
        Self::new(Arc::new(table))
    }

    pub fn table(&self) -> &dyn Table {
        self.table.as_ref()
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(crate::storage::inmemory::InMemoryTable::new()))
    }
}
