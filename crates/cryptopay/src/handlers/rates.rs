//! Exchange rate handlers.
//!
//! Rate rows live in the `RATE` partition and are written by an external
//! ingester, under sort key `#<timestamp>` or `<pair>#<timestamp>`. Both
//! handlers read the whole partition; ordering comes from the timestamp, not
//! the sort key.

use anyhow::Context;

use cryptopay_core::domain::{latest_rates, rate_history, Rate};
use cryptopay_core::storage::keys::RATE_PARTITION;
use cryptopay_core::storage::{codec, SortOrder, Table};

use super::{ApiError, ApiRequest, ApiResponse};

async fn load_rates(table: &dyn Table) -> Result<Vec<Rate>, ApiError> {
    let rates = table
        .query_by_partition(RATE_PARTITION, None, SortOrder::Descending)
        .await?
        .into_iter()
        .map(codec::row_to_rate)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = rates.len(), "Loaded rate rows");

    Ok(rates)
}

/// The most recent rate of each pair, as `{"BTC/USD": 61000, ...}`.
pub async fn get_rates(table: &dyn Table, _request: ApiRequest) -> ApiResponse {
    try_get_rates(table)
        .await
        .unwrap_or_else(|err| err.into_api_response("get_rates"))
}

async fn try_get_rates(table: &dyn Table) -> Result<ApiResponse, ApiError> {
    let rates = load_rates(table).await?;
    let body = serde_json::to_value(latest_rates(&rates)).context("Failed to serialize rates")?;
    Ok(ApiResponse::ok(body))
}

/// Every stored rate as `{pair, rate, timestamp}`, newest first.
pub async fn get_rates_history(table: &dyn Table, _request: ApiRequest) -> ApiResponse {
    try_get_rates_history(table)
        .await
        .unwrap_or_else(|err| err.into_api_response("get_rates_history"))
}

async fn try_get_rates_history(table: &dyn Table) -> Result<ApiResponse, ApiError> {
    let rates = rate_history(load_rates(table).await?);
    let body = serde_json::to_value(&rates).context("Failed to serialize rate history")?;
    Ok(ApiResponse::ok(body))
}
