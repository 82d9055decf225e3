//! User handlers: create, get, and list a user's payments.

use anyhow::Context;
use serde_json::json;

use cryptopay_core::domain::CreateUserRequest;
use cryptopay_core::storage::keys::{user_key, PAYMENT_PREFIX};
use cryptopay_core::storage::{codec, SortOrder, Table};
use cryptopay_core::timestamp;

use super::error::USER_NOT_FOUND;
use super::{ApiError, ApiRequest, ApiResponse};

/// Create a user from `{"email": ...}`. Returns 201 with `{"userId": ...}`.
pub async fn create_user(table: &dyn Table, request: ApiRequest) -> ApiResponse {
    try_create_user(table, request)
        .await
        .unwrap_or_else(|err| err.into_api_response("create_user"))
}

async fn try_create_user(table: &dyn Table, request: ApiRequest) -> Result<ApiResponse, ApiError> {
    let body = request.json_body()?;
    let user = CreateUserRequest::from_json(&body)?.into_user(timestamp::now());

    table.put_unique(codec::user_to_row(&user)?).await?;

    tracing::info!(user_id = %user.id, "Created new user");

    Ok(ApiResponse::created(json!({ "userId": user.id })))
}

/// Get a single user by the `id` path parameter.
pub async fn get_user(table: &dyn Table, request: ApiRequest) -> ApiResponse {
    try_get_user(table, request)
        .await
        .unwrap_or_else(|err| err.into_api_response("get_user"))
}

async fn try_get_user(table: &dyn Table, request: ApiRequest) -> Result<ApiResponse, ApiError> {
    let user_id = request.path_parameter("id")?;

    let row = table
        .get_by_key(&user_key(user_id))
        .await?
        .ok_or(ApiError::NotFound(USER_NOT_FOUND))?;
    let user = codec::row_to_user(row)?;

    let body = serde_json::to_value(&user).context("Failed to serialize user")?;
    Ok(ApiResponse::ok(body))
}

/// List every payment of the user named by the `id` path parameter.
///
/// The user row itself is not checked; an unknown user has no payments.
pub async fn get_user_payments(table: &dyn Table, request: ApiRequest) -> ApiResponse {
    try_get_user_payments(table, request)
        .await
        .unwrap_or_else(|err| err.into_api_response("get_user_payments"))
}

async fn try_get_user_payments(
    table: &dyn Table,
    request: ApiRequest,
) -> Result<ApiResponse, ApiError> {
    let user_id = request.path_parameter("id")?;

    let payments = table
        .query_by_partition(user_id, Some(PAYMENT_PREFIX), SortOrder::Ascending)
        .await?
        .into_iter()
        .map(codec::row_to_payment)
        .collect::<Result<Vec<_>, _>>()?;

    let body = serde_json::to_value(&payments).context("Failed to serialize payments")?;
    Ok(ApiResponse::ok(body))
}
