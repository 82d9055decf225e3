//! Shared helpers for handler tests.

use async_trait::async_trait;
use serde_json::Value;

use cryptopay_core::storage::{
    PrimaryKey, Result, Row, ScanFilter, SortOrder, StorageError, Table,
};

use super::{ApiRequest, ApiResponse};

/// A table whose every call fails, for the 500 paths.
pub struct FailingTable;

fn unavailable<T>() -> Result<T> {
    Err(StorageError::ConnectionFailed(
        "connection refused by 10.0.0.7:8000".to_string(),
    ))
}

#[async_trait]
impl Table for FailingTable {
    async fn put_unique(&self, _row: Row) -> Result<()> {
        unavailable()
    }

    async fn get_by_key(&self, _key: &PrimaryKey) -> Result<Option<Row>> {
        unavailable()
    }

    async fn query_by_partition(
        &self,
        _pk: &str,
        _sk_prefix: Option<&str>,
        _order: SortOrder,
    ) -> Result<Vec<Row>> {
        unavailable()
    }

    async fn query_by_index(&self, _index_name: &str, _value: &str) -> Result<Vec<Row>> {
        unavailable()
    }

    async fn scan_with_filter(&self, _filter: &ScanFilter) -> Result<Vec<Row>> {
        unavailable()
    }
}

/// A request carrying `body` serialized as JSON.
pub fn json_request(body: Value) -> ApiRequest {
    ApiRequest::new().with_body(serde_json::to_vec(&body).unwrap())
}

/// A request carrying only the `id` path parameter.
pub fn id_request(id: &str) -> ApiRequest {
    ApiRequest::new().with_path_parameter("id", id)
}

/// The `message` field of an error response.
pub fn message(response: &ApiResponse) -> &str {
    response.body["message"].as_str().unwrap()
}

/// Asserts a body never leaks the internal key attributes.
pub fn assert_no_keys(entity: &Value) {
    let object = entity.as_object().unwrap();
    assert!(!object.contains_key("pk"), "pk leaked: {entity}");
    assert!(!object.contains_key("sk"), "sk leaked: {entity}");
}
