// ABOUTME: Scripted collaborators for exercising the engines without a backend
// ABOUTME: Mock transport with queued, delayed, and gated responses plus recording confirm/notify
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use crate::client::{ApiRequest, ApiResponse, HttpMethod, RestTransport};
use crate::errors::{AppError, AppResult};
use crate::shell::{Confirm, Notifier};
use admin_panel_core::schema::Row;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

enum Reply {
    Respond(ApiResponse),
    Fail(AppError),
}

struct Scripted {
    reply: Reply,
    delay: Option<Duration>,
    gate: Option<Arc<Notify>>,
}

/// Transport answering from a queue of scripted replies.
///
/// With an empty queue a GET answers `{"rows": [], "count": 0}`, a POST or
/// PUT echoes its body, and a DELETE answers 204.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Transport with an empty script
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle, ready to pass where `Arc<dyn RestTransport>` is expected
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn push(&self, scripted: Scripted) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(scripted);
    }

    /// Queue a response
    pub fn push_response(&self, status: u16, body: Value) {
        self.push(Scripted {
            reply: Reply::Respond(ApiResponse::new(status, body)),
            delay: None,
            gate: None,
        });
    }

    /// Queue a `{rows, count}` list response
    pub fn push_rows(&self, rows: Value, count: u64) {
        self.push_response(200, json!({ "rows": rows, "count": count }));
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: AppError) {
        self.push(Scripted {
            reply: Reply::Fail(error),
            delay: None,
            gate: None,
        });
    }

    /// Queue a response delivered after `delay`
    pub fn push_delayed(&self, delay: Duration, status: u16, body: Value) {
        self.push(Scripted {
            reply: Reply::Respond(ApiResponse::new(status, body)),
            delay: Some(delay),
            gate: None,
        });
    }

    /// Queue a response held until the returned gate is notified
    #[must_use]
    pub fn push_gated(&self, status: u16, body: Value) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(Scripted {
            reply: Reply::Respond(ApiResponse::new(status, body)),
            delay: None,
            gate: Some(Arc::clone(&gate)),
        });
        gate
    }

    /// Every request received, in order
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received with `method`
    #[must_use]
    pub fn requests_with(&self, method: HttpMethod) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method)
            .collect()
    }

    /// Number of requests received
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Most recent request
    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn default_reply(request: &ApiRequest) -> ApiResponse {
        match request.method {
            HttpMethod::Get => ApiResponse::new(200, json!({ "rows": [], "count": 0 })),
            HttpMethod::Post => ApiResponse::new(201, request.body.clone().unwrap_or(Value::Null)),
            HttpMethod::Put => ApiResponse::new(200, request.body.clone().unwrap_or(Value::Null)),
            HttpMethod::Delete => ApiResponse::new(204, Value::Null),
        }
    }
}

#[async_trait]
impl RestTransport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let Some(scripted) = next else {
            return Ok(Self::default_reply(&request));
        };

        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = scripted.gate {
            gate.notified().await;
        }
        match scripted.reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(error) => Err(error),
        }
    }
}

/// Confirm that always gives the same answer and records each prompt
#[derive(Debug)]
pub struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    /// Always answer `answer`
    #[must_use]
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Prompts shown so far
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, message: &str) -> bool {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
        self.answer
    }
}

/// Notifier that keeps every alert
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Empty recorder
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Alerts raised so far
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

/// Rows from a JSON array literal; entries without an integer id are skipped
#[must_use]
pub fn rows(values: Value) -> Vec<Row> {
    match values {
        Value::Array(items) => items.into_iter().filter_map(|v| Row::from_value(v).ok()).collect(),
        _ => Vec::new(),
    }
}
