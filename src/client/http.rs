// ABOUTME: reqwest-backed RestTransport for the multi-tenant CRUD backend
// ABOUTME: Adds tenant, bearer token, and request-id headers and parses JSON bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use super::{ApiRequest, ApiResponse, HttpMethod, RestTransport};
use crate::config::environment::PanelConfig;
use crate::errors::{AppError, AppResult};
use admin_panel_core::constants::headers;
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;
use uuid::Uuid;

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Backend origin, e.g. `http://localhost:3000`
    pub base_url: Url,
    /// Value of the tenant header, if the backend is multi-tenant
    pub tenant_id: Option<String>,
    /// Bearer token for the `Authorization` header
    pub api_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl From<&PanelConfig> for HttpTransportConfig {
    fn from(config: &PanelConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            tenant_id: config.tenant_id.clone(),
            api_token: config.api_token.clone(),
            timeout: config.http_timeout,
        }
    }
}

/// Transport that talks to the backend over HTTP
pub struct HttpTransport {
    config: HttpTransportConfig,
    client: Client,
}

impl HttpTransport {
    /// Create a transport with its own connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: HttpTransportConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn url_for(&self, path: &str) -> AppResult<Url> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| AppError::config_invalid(format!("Invalid request path {path}: {e}")))
    }

    const fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

#[async_trait]
impl RestTransport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let url = self.url_for(&request.path)?;
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        let mut builder = self
            .client
            .request(Self::method(request.method), url)
            .header(headers::REQUEST_ID, &request_id);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(tenant_id) = &self.config.tenant_id {
            builder = builder.header(headers::TENANT_ID, tenant_id);
        }
        if let Some(token) = &self.config.api_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            AppError::unavailable(format!("{} {} failed: {e}", request.method, request.path))
                .with_request_id(&request_id)
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            AppError::unavailable(format!("Failed to read response body: {e}"))
                .with_request_id(&request_id)
        })?;

        debug!(
            http.method = %request.method,
            http.path = %request.path,
            http.status = status,
            http.duration_ms = started.elapsed().as_millis() as u64,
            request.id = %request_id,
            "Backend request completed"
        );

        let body = parse_body(&text);

        Ok(ApiResponse::new(status, body))
    }
}

/// JSON when the body parses, the raw text otherwise, `Null` when empty
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|e| {
        debug!(error = %e, "Backend body is not JSON; keeping raw text");
        Value::String(text.to_owned())
    })
}
