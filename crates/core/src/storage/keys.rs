//! Key layout for the single table.
//!
//! Pure functions for building partition and sort keys. Users and payments
//! share the user's partition and are told apart by sort-key prefix. Rates
//! live in one fixed partition.
//!
//! | Entity  | pk         | sk                    |
//! |---------|------------|-----------------------|
//! | User    | `<userId>` | `USER#<userId>`       |
//! | Payment | `<userId>` | `PAYMENT#<timestamp>` |
//! | Rate    | `RATE`     | `#<timestamp>`        |

use chrono::{DateTime, Utc};

use super::PrimaryKey;
use crate::timestamp;

// ============================================================================
// Attribute names
// ============================================================================

pub const PARTITION_KEY: &str = "pk";
pub const SORT_KEY: &str = "sk";

// ============================================================================
// Key prefixes
// ============================================================================

pub const USER_PREFIX: &str = "USER#";
pub const PAYMENT_PREFIX: &str = "PAYMENT#";
pub const RATE_PARTITION: &str = "RATE";
pub const RATE_PREFIX: &str = "#";

// ============================================================================
// Secondary index
// ============================================================================

/// Index for looking up a payment by ID without knowing its owner.
pub const PAYMENT_ID_INDEX: &str = "paymentId-index";
/// Attribute the payment index is keyed on.
pub const PAYMENT_ID_ATTRIBUTE: &str = "paymentId";

// ============================================================================
// Builders
// ============================================================================

/// Key for a User.
///
/// Pattern: (`<user_id>`, `USER#<user_id>`)
pub fn user_key(user_id: &str) -> PrimaryKey {
    PrimaryKey::new(user_id, format!("{USER_PREFIX}{user_id}"))
}

/// Key for a Payment, stored in its owner's partition.
///
/// Pattern: (`<user_id>`, `PAYMENT#<created_at>`)
pub fn payment_key(user_id: &str, created_at: &DateTime<Utc>) -> PrimaryKey {
    PrimaryKey::new(
        user_id,
        format!("{PAYMENT_PREFIX}{}", timestamp::format(created_at)),
    )
}

/// Key for a Rate observation.
///
/// Pattern: (`RATE`, `#<timestamp>`)
pub fn rate_key(timestamp: &str) -> PrimaryKey {
    PrimaryKey::new(RATE_PARTITION, format!("{RATE_PREFIX}{timestamp}"))
}

/// Recovers the timestamp portion of a timestamped sort key.
///
/// Returns everything after the first `#`, or `None` if there is none.
pub fn timestamp_from_sort_key(sk: &str) -> Option<&str> {
    sk.split_once('#').map(|(_, ts)| ts)
}

/// Recovers the pair from a `<pair>#<timestamp>` rate sort key.
///
/// Returns `None` for `#<timestamp>` keys, which carry no pair.
pub fn pair_from_sort_key(sk: &str) -> Option<&str> {
    sk.split_once('#')
        .map(|(pair, _)| pair)
        .filter(|pair| !pair.is_empty())
}
