//! Create-request parsing.
//!
//! Bodies arrive as untyped JSON so that type mismatches surface as the
//! per-field validation messages instead of a generic decode failure. Rules
//! run in a fixed order and the first failure wins.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::types::{Amount, Payment, User};
use super::validation::{validate_currency, validate_email};
use super::ValidationError;

/// Validated payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub email: String,
}

impl CreateUserRequest {
    /// Parses and validates a create-user body.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let email = non_empty_str(body, "email").ok_or(ValidationError::InvalidEmail)?;
        validate_email(email)?;

        Ok(Self {
            email: email.to_string(),
        })
    }

    /// Convert into a new User created at `now`.
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User::new(self.email, now)
    }
}

/// Validated payload for creating a payment.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePaymentRequest {
    pub user_id: String,
    pub amount: Amount,
    pub currency: String,
    pub metadata: Value,
}

impl CreatePaymentRequest {
    /// Parses and validates a create-payment body.
    ///
    /// Order: `userId`, `amount`, `currency` presence, currency format.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let user_id = non_empty_str(body, "userId").ok_or(ValidationError::InvalidUserId)?;
        let amount = body
            .get("amount")
            .and_then(parse_amount)
            .ok_or(ValidationError::InvalidAmount)?;
        let currency = non_empty_str(body, "currency").ok_or(ValidationError::InvalidCurrency)?;
        validate_currency(currency)?;

        let metadata = body
            .get("metadata")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        Ok(Self {
            user_id: user_id.to_string(),
            amount,
            currency: currency.to_string(),
            metadata,
        })
    }

    /// Convert into a new pending Payment created at `now`.
    pub fn into_payment(self, now: DateTime<Utc>) -> Payment {
        Payment::new(self.user_id, self.amount, self.currency, self.metadata, now)
    }
}

/// Returns the field if it is a non-empty string.
fn non_empty_str<'a>(body: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Accepts non-empty strings and non-zero numbers.
fn parse_amount(value: &Value) -> Option<Amount> {
    match value {
        Value::String(s) if !s.is_empty() => Some(Amount::new(s.clone())),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(Amount::new(n.to_string())),
        _ => None,
    }
}
