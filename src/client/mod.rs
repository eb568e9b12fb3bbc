// ABOUTME: REST transport abstraction consumed by the datatable, forms, and entity shell
// ABOUTME: Defines the request/response envelope and the list response contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

//! # REST Client
//!
//! The engines never talk HTTP directly. They build an [`ApiRequest`] and hand
//! it to a [`RestTransport`], which lets tests substitute a scripted transport
//! and lets the CLI use [`HttpTransport`].

/// reqwest-backed transport
pub mod http;

/// `{rows, count}` list response parsing
pub mod list;

pub use http::HttpTransport;
pub use list::ListResponse;

use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// HTTP verbs used by the CRUD contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// List rows
    Get,
    /// Create a row
    Post,
    /// Replace a row
    Put,
    /// Remove a row
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// One request against the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Verb
    pub method: HttpMethod,
    /// Path relative to the backend base URL, e.g. `/api/orders/5`
    pub path: String,
    /// Query parameters in order
    pub query: Vec<(String, String)>,
    /// JSON body for POST/PUT
    pub body: Option<Value>,
}

impl ApiRequest {
    /// GET a collection with query parameters
    pub fn get(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            query,
            body: None,
        }
    }

    /// POST a JSON body
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// PUT a JSON body
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Put,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// DELETE a resource
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Look up a query parameter by name
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Backend answer; `body` is `Value::Null` when the response had no content
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body
    pub body: Value,
}

impl ApiResponse {
    /// Build a response
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// 2xx status
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Convert a non-2xx response into an error naming the request
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` when the status is not 2xx
    pub fn error_for_status(self, request: &ApiRequest) -> AppResult<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let detail = self
            .body
            .get("message")
            .or_else(|| self.body.get("error"))
            .and_then(Value::as_str)
            .map_or_else(|| format!("HTTP {}", self.status), ToOwned::to_owned);
        Err(AppError::external_service(
            format!("{} {}", request.method, request.path),
            detail,
        )
        .with_status(self.status))
    }
}

/// Executes CRUD requests against the backend
#[async_trait]
pub trait RestTransport: Send + Sync {
    /// Send one request and return the status and parsed body.
    ///
    /// Non-2xx statuses are returned as responses, not errors; only
    /// transport-level failures are errors.
    async fn execute(&self, request: ApiRequest) -> AppResult<ApiResponse>;
}

/// Join a collection endpoint and a row id: `/api/orders` + 5 → `/api/orders/5`
#[must_use]
pub fn resource_path(endpoint: &str, id: i64) -> String {
    format!("{}/{id}", endpoint.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use admin_panel_core::errors::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_resource_path_trims_trailing_slash() {
        assert_eq!(resource_path("/api/orders", 5), "/api/orders/5");
        assert_eq!(resource_path("/api/orders/", 5), "/api/orders/5");
    }

    #[test]
    fn test_error_for_status_uses_backend_message() {
        let request = ApiRequest::put("/api/orders/5", json!({}));
        let error = ApiResponse::new(422, json!({"message": "total must be positive"}))
            .error_for_status(&request)
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::ExternalServiceError);
        assert_eq!(error.context.status, Some(422));
        assert!(error.message.contains("PUT /api/orders/5"));
        assert!(error.message.contains("total must be positive"));

        let ok = ApiResponse::new(204, Value::Null).error_for_status(&request);
        assert!(ok.is_ok());
    }
}
