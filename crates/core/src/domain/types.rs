use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Also the user's partition key.
    pub id: String,
    pub email: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh random ID.
    ///
    /// `created_at` and `updated_at` are both set to `now`.
    pub fn new(email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lifecycle state of a payment. New payments always start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// A payment amount, kept exactly as the caller wrote it.
///
/// String amounts are stored verbatim (`"150.00"` stays `"150.00"`) and numeric
/// amounts are stored as their JSON text. No decimal normalization happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    pub fn new(amount: impl Into<String>) -> Self {
        Self(amount.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A payment owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "paymentId")]
    pub id: Uuid,
    /// Owning user; also the partition the payment lives in.
    pub user_id: String,
    pub amount: Amount,
    /// Three uppercase ASCII letters.
    pub currency: String,
    pub status: PaymentStatus,
    /// Caller-supplied, untyped.
    #[serde(default = "empty_metadata")]
    pub metadata: Value,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new pending payment with a fresh random ID.
    pub fn new(
        user_id: impl Into<String>,
        amount: Amount,
        currency: impl Into<String>,
        metadata: Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            amount,
            currency: currency.into(),
            status: PaymentStatus::Pending,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }
}

fn empty_metadata() -> Value {
    Value::Object(serde_json::Map::new())
}

/// One observation of an exchange rate.
///
/// `timestamp` is the text recovered from the row's sort key and is returned
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub pair: String,
    pub rate: Number,
    pub timestamp: String,
}

impl Rate {
    pub fn new(pair: impl Into<String>, rate: impl Into<Number>, timestamp: DateTime<Utc>) -> Self {
        Self {
            pair: pair.into(),
            rate: rate.into(),
            timestamp: crate::timestamp::format(&timestamp),
        }
    }
}
