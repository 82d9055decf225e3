use axum::http::StatusCode;
use cryptopay_core::domain::ValidationError;
use cryptopay_core::storage::StorageError;
use thiserror::Error;

use super::ApiResponse;

pub const USER_NOT_FOUND: &str = "User not found.";
pub const PAYMENT_NOT_FOUND: &str = "Payment not found.";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error.";

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the error and turns it into the response the caller sees.
    ///
    /// Storage and unexpected failures are logged in full and answered with a
    /// generic message.
    pub fn into_api_response(self, operation: &'static str) -> ApiResponse {
        let status = self.status();
        match &self {
            Self::Validation(err) => {
                tracing::warn!(operation, reason = %err, "Rejected invalid request");
                ApiResponse::message(status, &err.to_string())
            }
            Self::NotFound(message) => {
                tracing::debug!(operation, "{message}");
                ApiResponse::message(status, message)
            }
            Self::Storage(_) | Self::Unexpected(_) => {
                let detail = format!("{self:#}");
                tracing::error!(operation, error = %detail, "Request failed");
                ApiResponse::message(status, INTERNAL_SERVER_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serde_json::json;

    #[test]
    fn test_validation_maps_to_400_with_rule_message() {
        let response = ApiError::from(ValidationError::InvalidCurrencyFormat).into_api_response("test");
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, json!({ "message": "Invalid currency format." }));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound(PAYMENT_NOT_FOUND).into_api_response("test");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, json!({ "message": "Payment not found." }));
    }

    #[test]
    fn test_failures_hide_detail() {
        let storage = ApiError::from(StorageError::ConnectionFailed("10.0.0.1 refused".to_string()));
        let unexpected = ApiError::from(anyhow!("secret detail"));

        for err in [storage, unexpected] {
            let response = err.into_api_response("test");
            assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(response.body, json!({ "message": "Internal server error." }));
        }
    }
}
