use std::collections::HashMap;

use anyhow::{anyhow, Context};
use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use super::ApiError;

/// A handler invocation: an optional raw body plus named path parameters.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub body: Option<Bytes>,
    pub path_parameters: HashMap<String, String>,
}

impl ApiRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a request from a raw body. An empty body counts as absent.
    pub fn from_body(body: Bytes) -> Self {
        Self {
            body: (!body.is_empty()).then_some(body),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    /// Decodes the body as a JSON object.
    ///
    /// A missing body, invalid JSON or any non-object value is an unexpected
    /// error, not a validation failure.
    pub fn json_body(&self) -> Result<Map<String, Value>, ApiError> {
        let body = self
            .body
            .as_ref()
            .ok_or_else(|| anyhow!("Request body is missing"))?;

        match serde_json::from_slice::<Value>(body).context("Request body is not valid JSON")? {
            Value::Object(map) => Ok(map),
            other => Err(anyhow!("Request body is not a JSON object: {other}").into()),
        }
    }

    /// Returns a required path parameter.
    pub fn path_parameter(&self, name: &str) -> Result<&str, ApiError> {
        self.path_parameters
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("Missing path parameter: {name}").into())
    }
}

/// A handler result: a status code and a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn created(body: Value) -> Self {
        Self::new(StatusCode::CREATED, body)
    }

    /// A `{"message": ...}` body.
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self::new(status, json!({ "message": message }))
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
