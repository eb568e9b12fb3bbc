// ABOUTME: Opaque record fetched from the backend, identified by a numeric id
// ABOUTME: Resolves dotted property paths used by column keys and field ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use crate::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One fetched record. Identity is `id`; every other property is opaque.
///
/// `fields` holds the complete object including `id`, so a row serializes back
/// to exactly what the backend sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Row {
    id: i64,
    fields: Map<String, Value>,
}

impl Row {
    /// Numeric identity
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// All properties, `id` included
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Resolve a property path such as `customer.name`
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Build a row from an arbitrary JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object with an integer `id`
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(AppError::new(
                ErrorCode::InvalidFormat,
                format!("row must be a JSON object, got {other}"),
            )),
        }
    }

    /// Convert back into a JSON object
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl TryFrom<Map<String, Value>> for Row {
    type Error = AppError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = fields
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| AppError::new(ErrorCode::InvalidFormat, "row is missing an integer id"))?;
        Ok(Self { id, fields })
    }
}

impl From<Row> for Map<String, Value> {
    fn from(row: Row) -> Self {
        row.fields
    }
}
