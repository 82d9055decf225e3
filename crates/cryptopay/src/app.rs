use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        health::livez,
        routes::{
            create_payment, create_user, get_payment, get_rates, get_rates_history, get_user,
            get_user_payments, list_payments,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/livez", get(livez))
        // User routes
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/payments", get(get_user_payments))
        // Payment routes
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/{id}", get(get_payment))
        // Rate routes
        .route("/rates", get(get_rates))
        .route("/rates/history", get(get_rates_history))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
