// ABOUTME: Parses the backend list response contract into typed rows
// ABOUTME: Accepts either `rows` or `items` as the collection key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use crate::errors::{AppError, AppResult, ErrorCode};
use admin_panel_core::schema::Row;
use serde_json::Value;

/// One page of rows plus the backend's total count
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse {
    /// Rows of the requested page
    pub rows: Vec<Row>,
    /// Total matching rows across all pages
    pub count: u64,
}

impl ListResponse {
    /// Parse `{rows, count}` or `{items, count}`.
    ///
    /// A missing `count` falls back to the number of rows received.
    ///
    /// # Errors
    ///
    /// Returns an error if neither key holds an array, or a row has no integer id
    pub fn from_body(body: Value) -> AppResult<Self> {
        let Value::Object(mut map) = body else {
            return Err(AppError::new(
                ErrorCode::InvalidFormat,
                "list response must be a JSON object",
            ));
        };

        let count = map.get("count").and_then(Value::as_u64);
        let raw_rows = match map.remove("rows").or_else(|| map.remove("items")) {
            Some(Value::Array(rows)) => rows,
            _ => {
                return Err(AppError::new(
                    ErrorCode::InvalidFormat,
                    "list response has neither a `rows` nor an `items` array",
                ))
            }
        };

        let rows = raw_rows
            .into_iter()
            .map(Row::from_value)
            .collect::<AppResult<Vec<_>>>()?;
        let count = count.unwrap_or(rows.len() as u64);

        Ok(Self { rows, count })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_rows_or_items() {
        let rows = ListResponse::from_body(json!({"rows": [{"id": 1}], "count": 40})).unwrap();
        assert_eq!(rows.rows.len(), 1);
        assert_eq!(rows.count, 40);

        let items = ListResponse::from_body(json!({"items": [{"id": 1}, {"id": 2}]})).unwrap();
        assert_eq!(items.count, 2);
    }

    #[test]
    fn test_rejects_malformed_bodies() {
        assert!(ListResponse::from_body(json!([])).is_err());
        assert!(ListResponse::from_body(json!({"count": 1})).is_err());
        assert!(ListResponse::from_body(json!({"rows": [{"name": "no id"}]})).is_err());
    }
}
