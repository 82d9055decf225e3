use async_trait::async_trait;

use super::{PrimaryKey, Result, Row, ScanFilter, SortOrder};

/// A single wide-column table keyed by (`pk`, `sk`) with secondary indexes.
///
/// Every write is one atomic single-row put. Implementations must be cheap to
/// share across concurrent requests.
#[async_trait]
pub trait Table: Send + Sync {
    /// Writes a new row.
    ///
    /// Fails with `StorageError::AlreadyExists` if a row with the same key is
    /// already present; nothing is overwritten.
    async fn put_unique(&self, row: Row) -> Result<()>;

    /// Point lookup by primary key.
    async fn get_by_key(&self, key: &PrimaryKey) -> Result<Option<Row>>;

    /// Returns every row in partition `pk` whose sort key starts with
    /// `sk_prefix`, ordered by sort key. `None` reads the whole partition.
    async fn query_by_partition(
        &self,
        pk: &str,
        sk_prefix: Option<&str>,
        order: SortOrder,
    ) -> Result<Vec<Row>>;

    /// Returns every row whose attribute indexed by `index_name` equals `value`.
    async fn query_by_index(&self, index_name: &str, value: &str) -> Result<Vec<Row>>;

    /// Full-table scan keeping only rows that match `filter`.
    ///
    /// Reads the whole table. Prefer a keyed query whenever one exists.
    async fn scan_with_filter(&self, filter: &ScanFilter) -> Result<Vec<Row>>;
}
