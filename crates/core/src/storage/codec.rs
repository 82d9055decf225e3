//! Entity <-> row conversion.
//!
//! `*_to_row` derives the key attributes and flattens the entity into row
//! attributes. `row_to_*` strips the key attributes before decoding, so a
//! decoded entity never carries `pk`/`sk`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::keys::{self, PARTITION_KEY, SORT_KEY};
use super::{PrimaryKey, Result, Row, StorageError};
use crate::domain::{Payment, Rate, User};

// ============================================================================
// User conversions
// ============================================================================

/// Convert a User to a row.
pub fn user_to_row(user: &User) -> Result<Row> {
    entity_to_row(user, keys::user_key(&user.id))
}

/// Convert a row to a User.
///
/// Rows without an `id` attribute take it from the partition key.
pub fn row_to_user(mut row: Row) -> Result<User> {
    fill_from_partition_key(&mut row, "id");
    row_to_entity(row)
}

// ============================================================================
// Payment conversions
// ============================================================================

/// Convert a Payment to a row.
pub fn payment_to_row(payment: &Payment) -> Result<Row> {
    entity_to_row(
        payment,
        keys::payment_key(&payment.user_id, &payment.created_at),
    )
}

/// Convert a row to a Payment.
///
/// Rows without a `userId` attribute take it from the partition key.
pub fn row_to_payment(mut row: Row) -> Result<Payment> {
    fill_from_partition_key(&mut row, "userId");
    row_to_entity(row)
}

// ============================================================================
// Rate conversions
// ============================================================================

/// Convert a Rate to a row. The timestamp is carried only by the sort key.
pub fn rate_to_row(rate: &Rate) -> Row {
    let key = keys::rate_key(&rate.timestamp);
    let mut row = Row::new();
    row.insert(PARTITION_KEY.to_string(), Value::String(key.pk));
    row.insert(SORT_KEY.to_string(), Value::String(key.sk));
    row.insert("pair".to_string(), Value::String(rate.pair.clone()));
    row.insert("rate".to_string(), Value::Number(rate.rate.clone()));
    row
}

/// Convert a row to a Rate, recovering the timestamp from the sort key.
///
/// Reads both `#<timestamp>` and `<pair>#<timestamp>` sort keys. A row
/// without a `pair` attribute takes the pair from the latter.
pub fn row_to_rate(row: Row) -> Result<Rate> {
    let key = PrimaryKey::of_row(&row)?;
    let timestamp = keys::timestamp_from_sort_key(&key.sk)
        .ok_or_else(|| StorageError::InvalidData(format!("Untimestamped rate key: {}", key.sk)))?
        .to_string();

    let pair = row
        .get("pair")
        .and_then(Value::as_str)
        .or_else(|| keys::pair_from_sort_key(&key.sk))
        .ok_or_else(|| StorageError::InvalidData("Missing or invalid field: pair".to_string()))?
        .to_string();

    let rate = match row.get("rate") {
        Some(Value::Number(n)) => n.clone(),
        _ => {
            return Err(StorageError::InvalidData(
                "Missing or invalid field: rate".to_string(),
            ))
        }
    };

    Ok(Rate {
        pair,
        rate,
        timestamp,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Removes the internal key attributes from a row.
pub fn strip_keys(mut row: Row) -> Row {
    row.remove(PARTITION_KEY);
    row.remove(SORT_KEY);
    row
}

fn entity_to_row<T: Serialize>(entity: &T, key: PrimaryKey) -> Result<Row> {
    let mut row = match serde_json::to_value(entity) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(StorageError::Serialization(format!(
                "Entity is not an object: {other}"
            )))
        }
        Err(e) => return Err(StorageError::Serialization(e.to_string())),
    };

    row.insert(PARTITION_KEY.to_string(), Value::String(key.pk));
    row.insert(SORT_KEY.to_string(), Value::String(key.sk));
    Ok(row)
}

/// Copies `pk` into `attribute` when the row lacks it.
fn fill_from_partition_key(row: &mut Row, attribute: &str) {
    if row.contains_key(attribute) {
        return;
    }
    if let Some(pk) = row.get(PARTITION_KEY).cloned() {
        row.insert(attribute.to_string(), pk);
    }
}

fn row_to_entity<T: DeserializeOwned>(row: Row) -> Result<T> {
    serde_json::from_value(Value::Object(strip_keys(row)))
        .map_err(|e| StorageError::Serialization(e.to_string()))
}
