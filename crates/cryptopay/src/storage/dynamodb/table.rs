//! DynamoDB table implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use cryptopay_core::storage::keys::{PAYMENT_ID_ATTRIBUTE, PAYMENT_ID_INDEX};
use cryptopay_core::storage::{
    PrimaryKey, Result, Row, ScanFilter, SortOrder, StorageError, Table,
};

use super::conversions::{item_to_row, row_to_item};
use super::error::{map_put_item_error, map_sdk_error};

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed table.
///
/// Holds one SDK client, which is safe to clone and share across requests.
#[derive(Debug, Clone)]
pub struct DynamoDbTable {
    client: Client,
    table_name: String,
}

impl DynamoDbTable {
    /// Creates a new table handle with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a table handle using the AWS SDK default credential chain.
    pub async fn connect(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn items_to_rows(items: Option<Vec<Item>>) -> Result<Vec<Row>> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(item_to_row)
        .collect()
}

/// Returns the next page's start key, or `None` when the last page was read.
fn next_page(last_evaluated_key: Option<Item>) -> Option<Item> {
    last_evaluated_key.filter(|key| !key.is_empty())
}

#[async_trait]
impl Table for DynamoDbTable {
    async fn put_unique(&self, row: Row) -> Result<()> {
        let key = PrimaryKey::of_row(&row)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(row_to_item(&row)))
            .condition_expression("attribute_not_exists(pk)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, key))?;

        Ok(())
    }

    async fn get_by_key(&self, key: &PrimaryKey) -> Result<Option<Row>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("pk", AttributeValue::S(key.pk.clone()))
            .key("sk", AttributeValue::S(key.sk.clone()))
            .send()
            .await
            .map_err(|e| map_sdk_error("GetItem", e))?;

        result.item.map(item_to_row).transpose()
    }

    async fn query_by_partition(
        &self,
        pk: &str,
        sk_prefix: Option<&str>,
        order: SortOrder,
    ) -> Result<Vec<Row>> {
        // DynamoDB rejects an empty begins_with operand.
        let sk_prefix = sk_prefix.filter(|prefix| !prefix.is_empty());
        let key_condition = match sk_prefix {
            Some(_) => "pk = :pk AND begins_with(sk, :sk_prefix)",
            None => "pk = :pk",
        };

        let mut rows = Vec::new();
        let mut start_key = None;

        loop {
            let mut query = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression(key_condition)
                .expression_attribute_values(":pk", AttributeValue::S(pk.to_string()));
            if let Some(prefix) = sk_prefix {
                query = query
                    .expression_attribute_values(":sk_prefix", AttributeValue::S(prefix.to_string()));
            }

            let result = query
                .scan_index_forward(order == SortOrder::Ascending)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| map_sdk_error("Query", e))?;

            rows.extend(items_to_rows(result.items)?);

            start_key = next_page(result.last_evaluated_key);
            if start_key.is_none() {
                break;
            }
        }

        Ok(rows)
    }

    async fn query_by_index(&self, index_name: &str, value: &str) -> Result<Vec<Row>> {
        let attribute = match index_name {
            PAYMENT_ID_INDEX => PAYMENT_ID_ATTRIBUTE,
            other => return Err(StorageError::QueryFailed(format!("Unknown index: {other}"))),
        };

        let mut rows = Vec::new();
        let mut start_key = None;

        loop {
            let result = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(index_name)
                .key_condition_expression("#attr = :value")
                .expression_attribute_names("#attr", attribute)
                .expression_attribute_values(":value", AttributeValue::S(value.to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| map_sdk_error("Query", e))?;

            rows.extend(items_to_rows(result.items)?);

            start_key = next_page(result.last_evaluated_key);
            if start_key.is_none() {
                break;
            }
        }

        Ok(rows)
    }

    async fn scan_with_filter(&self, filter: &ScanFilter) -> Result<Vec<Row>> {
        let ScanFilter::SortKeyBeginsWith(prefix) = filter;

        let mut rows = Vec::new();
        let mut start_key = None;

        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("begins_with(sk, :sk_prefix)")
                .expression_attribute_values(":sk_prefix", AttributeValue::S(prefix.clone()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| map_sdk_error("Scan", e))?;

            rows.extend(items_to_rows(result.items)?);

            start_key = next_page(result.last_evaluated_key);
            if start_key.is_none() {
                break;
            }
        }

        Ok(rows)
    }
}
