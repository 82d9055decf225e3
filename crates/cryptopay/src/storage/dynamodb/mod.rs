//! DynamoDB storage backend.
//!
//! Implements `cryptopay_core::storage::Table` on top of `aws-sdk-dynamodb`.
//! The table is expected to exist with string keys `pk`/`sk` and a
//! `paymentId-index` global secondary index (projection ALL) keyed on
//! `paymentId`.

mod conversions;
mod error;
mod table;

pub use table::DynamoDbTable;
