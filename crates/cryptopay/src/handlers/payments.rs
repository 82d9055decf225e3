//! Payment handlers: create, get by id, and list all.

use anyhow::Context;
use serde_json::json;

use cryptopay_core::domain::CreatePaymentRequest;
use cryptopay_core::storage::keys::{PAYMENT_ID_INDEX, PAYMENT_PREFIX};
use cryptopay_core::storage::{codec, ScanFilter, Table};
use cryptopay_core::timestamp;

use super::error::PAYMENT_NOT_FOUND;
use super::{ApiError, ApiRequest, ApiResponse};

/// Create a pending payment. Returns 201 with `{"paymentId": ...}`.
///
/// The sort key is `PAYMENT#<createdAt>`, so two payments for one user
/// created in the same microsecond share a key. Concurrent creates can
/// therefore conflict: the write is conditional, the second one is refused
/// rather than overwriting the first, and it is answered with a 500. There is
/// no retry.
pub async fn create_payment(table: &dyn Table, request: ApiRequest) -> ApiResponse {
    try_create_payment(table, request)
        .await
        .unwrap_or_else(|err| err.into_api_response("create_payment"))
}

async fn try_create_payment(
    table: &dyn Table,
    request: ApiRequest,
) -> Result<ApiResponse, ApiError> {
    let body = request.json_body()?;
    let payment = CreatePaymentRequest::from_json(&body)?.into_payment(timestamp::now());

    table.put_unique(codec::payment_to_row(&payment)?).await?;

    tracing::info!(
        payment_id = %payment.id,
        user_id = %payment.user_id,
        currency = %payment.currency,
        "Created new payment"
    );

    Ok(ApiResponse::created(json!({ "paymentId": payment.id })))
}

/// Get a payment by the `id` path parameter, through the payment id index.
pub async fn get_payment(table: &dyn Table, request: ApiRequest) -> ApiResponse {
    try_get_payment(table, request)
        .await
        .unwrap_or_else(|err| err.into_api_response("get_payment"))
}

async fn try_get_payment(table: &dyn Table, request: ApiRequest) -> Result<ApiResponse, ApiError> {
    let payment_id = request.path_parameter("id")?;

    let row = table
        .query_by_index(PAYMENT_ID_INDEX, payment_id)
        .await?
        .into_iter()
        .next()
        .ok_or(ApiError::NotFound(PAYMENT_NOT_FOUND))?;
    let payment = codec::row_to_payment(row)?;

    let body = serde_json::to_value(&payment).context("Failed to serialize payment")?;
    Ok(ApiResponse::ok(body))
}

/// List every payment of every user.
///
/// Full table scan; there is no access pattern for "all payments".
pub async fn list_payments(table: &dyn Table, _request: ApiRequest) -> ApiResponse {
    try_list_payments(table)
        .await
        .unwrap_or_else(|err| err.into_api_response("list_payments"))
}

async fn try_list_payments(table: &dyn Table) -> Result<ApiResponse, ApiError> {
    let filter = ScanFilter::SortKeyBeginsWith(PAYMENT_PREFIX.to_string());

    let payments = table
        .scan_with_filter(&filter)
        .await?
        .into_iter()
        .map(codec::row_to_payment)
        .collect::<Result<Vec<_>, _>>()?;

    let body = serde_json::to_value(&payments).context("Failed to serialize payments")?;
    Ok(ApiResponse::ok(body))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use super::*;
    use crate::handlers::testing::{assert_no_keys, id_request, json_request, message, FailingTable};
    use crate::handlers::users::create_user;
    use crate::storage::inmemory::InMemoryTable;

    async fn create(table: &InMemoryTable, body: Value) -> String {
        let response = create_payment(table, json_request(body)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["paymentId"].as_str().unwrap().to_string()
    }

    async fn rejection(body: Value) -> (StatusCode, String) {
        let table = InMemoryTable::new();
        let response = create_payment(&table, json_request(body)).await;
        assert_eq!(table.row_count().await, 0);
        (response.status, message(&response).to_string())
    }

    #[tokio::test]
    async fn test_create_and_get_payment() {
        let table = InMemoryTable::new();
        let payment_id = create(
            &table,
            json!({
                "userId": "u1",
                "amount": "150.00",
                "currency": "USD",
                "metadata": { "description": "x" },
            }),
        )
        .await;

        let response = get_payment(&table, id_request(&payment_id)).await;

        assert_eq!(response.status, StatusCode::OK);
        let payment = &response.body;
        assert_eq!(payment["paymentId"], payment_id.as_str());
        assert_eq!(payment["userId"], "u1");
        assert_eq!(payment["amount"], "150.00");
        assert_eq!(payment["currency"], "USD");
        assert_eq!(payment["metadata"], json!({ "description": "x" }));
        assert_eq!(payment["status"], "pending");
        assert_eq!(payment["createdAt"], payment["updatedAt"]);
        assert_no_keys(payment);
    }

    #[tokio::test]
    async fn test_create_payment_forces_pending_and_stores_numeric_amount_as_text() {
        let table = InMemoryTable::new();
        let payment_id = create(
            &table,
            json!({ "userId": "u1", "amount": 99.5, "currency": "EUR", "status": "completed" }),
        )
        .await;

        let payment = get_payment(&table, id_request(&payment_id)).await.body;

        assert_eq!(payment["amount"], "99.5");
        assert_eq!(payment["status"], "pending");
        assert_eq!(payment["metadata"], json!({}));
    }

    #[tokio::test]
    async fn test_get_payment_is_repeatable() {
        let table = InMemoryTable::new();
        let payment_id = create(
            &table,
            json!({ "userId": "u1", "amount": 5, "currency": "BTC" }),
        )
        .await;

        let first = get_payment(&table, id_request(&payment_id)).await;
        let second = get_payment(&table, id_request(&payment_id)).await;

        assert_eq!(
            serde_json::to_vec(&first.body).unwrap(),
            serde_json::to_vec(&second.body).unwrap()
        );
    }

    #[tokio::test]
    async fn test_get_payment_not_found() {
        let response = get_payment(&InMemoryTable::new(), id_request("missing")).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(message(&response), "Payment not found.");
    }

    #[tokio::test]
    async fn test_create_payment_rejects_bad_currency_format() {
        for currency in ["US", "usd", "12A", "USDT", "uSD"] {
            let (status, message) =
                rejection(json!({ "userId": "u1", "amount": "1", "currency": currency })).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "currency: {currency}");
            assert_eq!(message, "Invalid currency format.");
        }
    }

    #[tokio::test]
    async fn test_create_payment_rejects_bad_amounts() {
        let amounts = [
            None,
            Some(json!({ "value": 1 })),
            Some(json!([1])),
            Some(json!(true)),
            Some(json!(null)),
            Some(json!("")),
            Some(json!(0)),
        ];

        for amount in amounts {
            let mut body = json!({ "userId": "u1", "currency": "USD" });
            if let Some(amount) = amount.clone() {
                body["amount"] = amount;
            }
            let (status, message) = rejection(body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "amount: {amount:?}");
            assert_eq!(message, "Invalid or missing amount.");
        }
    }

    #[tokio::test]
    async fn test_create_payment_rule_order() {
        let cases = [
            (json!({}), "Invalid or missing userId."),
            (json!({ "userId": 7, "amount": "1", "currency": "USD" }), "Invalid or missing userId."),
            (json!({ "userId": "u1", "currency": "usd" }), "Invalid or missing amount."),
            (json!({ "userId": "u1", "amount": "1" }), "Invalid or missing currency."),
            (json!({ "userId": "u1", "amount": "1", "currency": 840 }), "Invalid or missing currency."),
        ];

        for (body, expected) in cases {
            let (status, message) = rejection(body.clone()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(message, expected, "body: {body}");
        }
    }

    #[tokio::test]
    async fn test_list_payments_returns_only_payments() {
        let table = InMemoryTable::new();
        let response = create_user(&table, json_request(json!({ "email": "a@b.co" }))).await;
        assert_eq!(response.status, StatusCode::CREATED);
        create(
            &table,
            json!({
                "userId": "u1",
                "amount": "150.00",
                "currency": "USD",
                "metadata": { "description": "x" },
            }),
        )
        .await;

        let response = list_payments(&table, ApiRequest::new()).await;

        assert_eq!(response.status, StatusCode::OK);
        let payments = response.body.as_array().unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0]["currency"], "USD");
        assert_eq!(payments[0]["status"], "pending");
        assert_no_keys(&payments[0]);
    }

    #[tokio::test]
    async fn test_payment_lists_read_rows_without_user_id_and_offset() {
        let table = InMemoryTable::new();
        let legacy = json!({
            "pk": "u1",
            "sk": "PAYMENT#2024-01-15T10:30:00.123456",
            "paymentId": "550e8400-e29b-41d4-a716-446655440009",
            "amount": "75.5",
            "currency": "EUR",
            "status": "pending",
            "metadata": {},
            "createdAt": "2024-01-15T10:30:00.123456",
            "updatedAt": "2024-01-15T10:30:00.123456",
        });
        table.put_unique(legacy.as_object().cloned().unwrap()).await.unwrap();
        create(
            &table,
            json!({ "userId": "u1", "amount": "10.00", "currency": "USD" }),
        )
        .await;

        let all = list_payments(&table, ApiRequest::new()).await;
        let own = crate::handlers::users::get_user_payments(&table, id_request("u1")).await;
        let single = get_payment(&table, id_request("550e8400-e29b-41d4-a716-446655440009")).await;

        assert_eq!(all.status, StatusCode::OK);
        assert_eq!(all.body.as_array().unwrap().len(), 2);
        assert_eq!(own.status, StatusCode::OK);
        let own = own.body.as_array().unwrap().clone();
        assert_eq!(own.len(), 2);
        assert_eq!(own[0]["userId"], "u1");
        assert_eq!(own[0]["amount"], "75.5");
        assert_eq!(single.status, StatusCode::OK);
        assert_eq!(single.body["createdAt"], "2024-01-15T10:30:00.123456Z");
    }

    #[tokio::test]
    async fn test_same_microsecond_payments_do_not_overwrite() {
        use cryptopay_core::domain::CreatePaymentRequest;
        use cryptopay_core::storage::StorageError;

        let table = InMemoryTable::new();
        let now = timestamp::now();
        let body = json!({ "userId": "u1", "amount": "1", "currency": "USD" });
        let request = CreatePaymentRequest::from_json(body.as_object().unwrap()).unwrap();
        let first = request.clone().into_payment(now);
        let second = request.into_payment(now);

        table.put_unique(codec::payment_to_row(&first).unwrap()).await.unwrap();
        let result = table.put_unique(codec::payment_to_row(&second).unwrap()).await;

        assert!(matches!(result, Err(StorageError::AlreadyExists { .. })));
        let kept = get_payment(&table, id_request(&first.id.to_string())).await;
        assert_eq!(kept.status, StatusCode::OK);
        let lost = get_payment(&table, id_request(&second.id.to_string())).await;
        assert_eq!(lost.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_payments_empty() {
        let response = list_payments(&InMemoryTable::new(), ApiRequest::new()).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!([]));
    }

    #[tokio::test]
    async fn test_payment_handlers_hide_storage_failures() {
        let body = json!({ "userId": "u1", "amount": "1", "currency": "USD" });
        let responses = [
            create_payment(&FailingTable, json_request(body)).await,
            get_payment(&FailingTable, id_request("p1")).await,
            list_payments(&FailingTable, ApiRequest::new()).await,
        ];

        for response in responses {
            assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message(&response), "Internal server error.");
        }
    }
}
