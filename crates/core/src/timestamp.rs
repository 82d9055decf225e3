//! UTC timestamp helpers.
//!
//! Timestamps end up in sort keys, so every one of them must render with the
//! same precision and zone for lexicographic order to match chronological
//! order. All timestamps are UTC, RFC 3339, with exactly six fractional digits
//! and a `Z` suffix (e.g. `2024-01-15T10:30:00.000000Z`).

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Returns the current UTC time truncated to microseconds.
///
/// Truncating up front keeps a value equal to itself after a
/// format/parse round trip.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Formats a timestamp in the canonical sortable form.
pub fn format(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses an RFC 3339 timestamp into UTC.
///
/// ISO 8601 text without an offset (`2024-01-15T10:30:00.123456`) is read
/// as UTC.
pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|err| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
                .map_err(|_| err)
        })
}

/// Serialize a timestamp in the canonical form.
pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(timestamp))
}

/// Deserialize an RFC 3339 timestamp into UTC.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}
