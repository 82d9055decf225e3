//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between rows (JSON objects) and DynamoDB
//! `AttributeValue` maps. These are testable in isolation without DynamoDB
//! access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use cryptopay_core::storage::{Row, StorageError};
use serde_json::{Map, Number, Value};

/// Convert a row to a DynamoDB item.
pub fn row_to_item(row: &Row) -> HashMap<String, AttributeValue> {
    row.iter()
        .map(|(name, value)| (name.clone(), value_to_attribute(value)))
        .collect()
}

/// Convert a DynamoDB item to a row.
pub fn item_to_row(item: HashMap<String, AttributeValue>) -> Result<Row, StorageError> {
    item.into_iter()
        .map(|(name, attribute)| Ok((name, attribute_to_value(attribute)?)))
        .collect()
}

/// Convert a JSON value to an attribute value.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_attribute(v)))
                .collect(),
        ),
    }
}

/// Convert an attribute value to a JSON value.
///
/// String and number sets become arrays. Binary attributes are rejected since
/// nothing in this table writes them.
pub fn attribute_to_value(attribute: AttributeValue) -> Result<Value, StorageError> {
    Ok(match attribute {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => Value::Number(parse_number(&n)?),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(
            values
                .into_iter()
                .map(attribute_to_value)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| Ok((k, attribute_to_value(v)?)))
                .collect::<Result<Map<_, _>, StorageError>>()?,
        ),
        AttributeValue::Ss(values) => Value::Array(values.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        other => {
            return Err(StorageError::InvalidData(format!(
                "Unsupported attribute type: {other:?}"
            )))
        }
    })
}

/// Parse a DynamoDB number, preferring integers so `61000` stays `61000`.
fn parse_number(n: &str) -> Result<Number, StorageError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Number::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StorageError::InvalidData(format!("Invalid number: {n}")))
}
