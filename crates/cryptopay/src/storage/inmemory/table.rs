//! In-memory table implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use cryptopay_core::storage::keys::{PAYMENT_ID_ATTRIBUTE, PAYMENT_ID_INDEX};
use cryptopay_core::storage::{
    PrimaryKey, Result, Row, ScanFilter, SortOrder, StorageError, Table,
};

/// In-memory single-table store.
///
/// Clones share the same underlying rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTable {
    rows: Arc<RwLock<BTreeMap<PrimaryKey, Row>>>,
}

impl InMemoryTable {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    #[cfg(test)]
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

/// Maps an index name to the attribute it is keyed on.
fn index_attribute(index_name: &str) -> Result<&'static str> {
    match index_name {
        PAYMENT_ID_INDEX => Ok(PAYMENT_ID_ATTRIBUTE),
        other => Err(StorageError::QueryFailed(format!("Unknown index: {other}"))),
    }
}

#[async_trait]
impl Table for InMemoryTable {
    async fn put_unique(&self, row: Row) -> Result<()> {
        let key = PrimaryKey::of_row(&row)?;
        let mut rows = self.rows.write().await;
        if rows.contains_key(&key) {
            return Err(StorageError::AlreadyExists {
                pk: key.pk,
                sk: key.sk,
            });
        }
        rows.insert(key, row);
        Ok(())
    }

    async fn get_by_key(&self, key: &PrimaryKey) -> Result<Option<Row>> {
        let rows = self.rows.read().await;
        Ok(rows.get(key).cloned())
    }

    async fn query_by_partition(
        &self,
        pk: &str,
        sk_prefix: Option<&str>,
        order: SortOrder,
    ) -> Result<Vec<Row>> {
        let sk_prefix = sk_prefix.unwrap_or_default();
        let rows = self.rows.read().await;
        let start = PrimaryKey::new(pk, sk_prefix);

        let mut matches: Vec<Row> = rows
            .range(start..)
            .take_while(|(key, _)| key.pk == pk && key.sk.starts_with(sk_prefix))
            .map(|(_, row)| row.clone())
            .collect();

        if order == SortOrder::Descending {
            matches.reverse();
        }
        Ok(matches)
    }

    async fn query_by_index(&self, index_name: &str, value: &str) -> Result<Vec<Row>> {
        let attribute = index_attribute(index_name)?;
        let rows = self.rows.read().await;

        // Index entries are ordered by sort key, like the table's own index.
        let mut matches: Vec<(&PrimaryKey, &Row)> = rows
            .iter()
            .filter(|(_, row)| row.get(attribute).and_then(Value::as_str) == Some(value))
            .collect();
        matches.sort_by(|(a, _), (b, _)| a.sk.cmp(&b.sk));

        Ok(matches.into_iter().map(|(_, row)| row.clone()).collect())
    }

    async fn scan_with_filter(&self, filter: &ScanFilter) -> Result<Vec<Row>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect())
    }
}
