//! axum adapters for the handlers.
//!
//! Each route turns the extracted body and path into an [`ApiRequest`] and
//! hands it to the matching handler with the shared table.

use axum::{
    body::Bytes,
    extract::{Path, State},
};

use super::{payments, rates, users, ApiRequest, ApiResponse};
use crate::state::AppState;

fn with_id(id: String) -> ApiRequest {
    ApiRequest::new().with_path_parameter("id", id)
}

/// POST /users
pub async fn create_user(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    users::create_user(state.table(), ApiRequest::from_body(body)).await
}

/// GET /users/{id}
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    users::get_user(state.table(), with_id(id)).await
}

/// GET /users/{id}/payments
pub async fn get_user_payments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse {
    users::get_user_payments(state.table(), with_id(id)).await
}

/// POST /payments
pub async fn create_payment(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    payments::create_payment(state.table(), ApiRequest::from_body(body)).await
}

/// GET /payments
pub async fn list_payments(State(state): State<AppState>) -> ApiResponse {
    payments::list_payments(state.table(), ApiRequest::new()).await
}

/// GET /payments/{id}
pub async fn get_payment(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    payments::get_payment(state.table(), with_id(id)).await
}

/// GET /rates
pub async fn get_rates(State(state): State<AppState>) -> ApiResponse {
    rates::get_rates(state.table(), ApiRequest::new()).await
}

/// GET /rates/history
pub async fn get_rates_history(State(state): State<AppState>) -> ApiResponse {
    rates::get_rates_history(state.table(), ApiRequest::new()).await
}
