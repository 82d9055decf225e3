//! Pure aggregation over rate observations.
//!
//! Timestamps are compared as strings. This is only sound because every rate
//! sort key uses the same fixed-precision UTC format.

use std::collections::BTreeMap;

use serde_json::Number;

use super::types::Rate;

/// Returns the most recent rate per currency pair.
///
/// When two rows of the same pair share a timestamp, the one seen first wins.
pub fn latest_rates(rates: &[Rate]) -> BTreeMap<String, Number> {
    let mut latest: BTreeMap<&str, &Rate> = BTreeMap::new();

    for rate in rates {
        let newer = latest
            .get(rate.pair.as_str())
            .is_none_or(|current| rate.timestamp > current.timestamp);
        if newer {
            latest.insert(rate.pair.as_str(), rate);
        }
    }

    latest
        .into_iter()
        .map(|(pair, rate)| (pair.to_string(), rate.rate.clone()))
        .collect()
}

/// Orders rate observations most recent first.
///
/// The sort is stable, so rows with equal timestamps keep their input order.
pub fn rate_history(mut rates: Vec<Rate>) -> Vec<Rate> {
    rates.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    rates
}
