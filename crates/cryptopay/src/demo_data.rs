//! Demo exchange rates.
//!
//! Rates are normally written by an external ingester. For local runs the
//! server can seed a short series so the rate endpoints return something.

use chrono::{DateTime, Duration, Utc};
use serde_json::Number;

use cryptopay_core::domain::Rate;
use cryptopay_core::storage::{codec, Result, Table};

/// Pairs and their rate at each of the last few sampling points, oldest first.
const SERIES: &[(&str, &[f64])] = &[
    ("BTC/USD", &[60_125.5, 60_480.0, 61_012.25]),
    ("ETH/USD", &[3_020.1, 3_005.75, 3_064.4]),
    ("SOL/USD", &[141.2, 143.05, 142.8]),
];

/// Minutes between two sampling points.
const INTERVAL_MINUTES: i64 = 5;

/// Builds the demo series ending at `now`.
pub fn generate_demo_rates(now: DateTime<Utc>) -> Vec<Rate> {
    let mut rates = Vec::new();

    for (offset, (pair, values)) in SERIES.iter().enumerate() {
        let count = values.len() as i64;
        for (i, value) in values.iter().enumerate() {
            let Some(rate) = Number::from_f64(*value) else {
                continue;
            };
            // Pairs are staggered by a second so no two rows share a sort key.
            let at = now
                - Duration::minutes(INTERVAL_MINUTES * (count - 1 - i as i64))
                - Duration::seconds(offset as i64);
            rates.push(Rate::new(*pair, rate, at));
        }
    }

    rates
}

/// Writes the demo series into `table`. Returns the number of rows written.
pub async fn seed_demo_rates(table: &dyn Table, now: DateTime<Utc>) -> Result<usize> {
    let rates = generate_demo_rates(now);
    for rate in &rates {
        table.put_unique(codec::rate_to_row(rate)).await?;
    }

    tracing::info!(count = rates.len(), "Seeded demo rates");
    Ok(rates.len())
}
