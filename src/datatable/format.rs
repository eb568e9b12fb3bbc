// ABOUTME: Cell rendering strategies resolved from column CellFormat descriptors
// ABOUTME: Built-in formats are matched directly; Custom formats resolve through a named registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use admin_panel_core::schema::{CellFormat, ColumnConfig, Row};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Plain-text form of a JSON value: strings unquoted, null empty
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Pure function turning a cell value (and its row) into display text
pub trait CellRenderer: Send + Sync {
    /// Render one cell; `value` is `None` when the row lacks the column key
    fn render(&self, value: Option<&Value>, row: &Row) -> String;
}

impl<F> CellRenderer for F
where
    F: Fn(Option<&Value>, &Row) -> String + Send + Sync,
{
    fn render(&self, value: Option<&Value>, row: &Row) -> String {
        self(value, row)
    }
}

/// Named renderers for `CellFormat::Custom`
#[derive(Default, Clone)]
pub struct RendererRegistry {
    custom: HashMap<String, Arc<dyn CellRenderer>>,
}

impl RendererRegistry {
    /// Registry with no custom renderers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a custom renderer
    pub fn register(&mut self, name: impl Into<String>, renderer: impl CellRenderer + 'static) {
        self.custom.insert(name.into(), Arc::new(renderer));
    }

    /// Whether a custom renderer exists under `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    /// Render the cell of `column` for `row`
    #[must_use]
    pub fn render_cell(&self, column: &ColumnConfig, row: &Row) -> String {
        let value = row.get(&column.key);
        match &column.render {
            None | Some(CellFormat::Text) => value.map(display_value).unwrap_or_default(),
            Some(CellFormat::Custom { name }) => match self.custom.get(name) {
                Some(renderer) => renderer.render(value, row),
                None => {
                    warn!(renderer = %name, column = %column.key, "Unknown cell renderer, showing raw value");
                    value.map(display_value).unwrap_or_default()
                }
            },
            Some(format) => value.map(|v| render_builtin(format, v)).unwrap_or_default(),
        }
    }
}

fn render_builtin(format: &CellFormat, value: &Value) -> String {
    match format {
        CellFormat::Number { decimals } => as_number(value).map_or_else(
            || display_value(value),
            |n| format!("{n:.prec$}", prec = usize::from(*decimals)),
        ),
        CellFormat::Currency { symbol, decimals } => as_number(value).map_or_else(
            || display_value(value),
            |n| {
                let sign = if n < 0.0 { "-" } else { "" };
                format!("{sign}{symbol}{:.prec$}", n.abs(), prec = usize::from(*decimals))
            },
        ),
        CellFormat::Date => format_timestamp(value, "%Y-%m-%d"),
        CellFormat::DateTime => format_timestamp(value, "%Y-%m-%d %H:%M"),
        CellFormat::Boolean {
            true_label,
            false_label,
        } => match value {
            Value::Bool(true) => true_label.clone(),
            Value::Bool(false) => false_label.clone(),
            other => display_value(other),
        },
        CellFormat::Badge { labels } => {
            let raw = display_value(value);
            labels.get(&raw).cloned().unwrap_or(raw)
        }
        CellFormat::Truncate { max_chars } => {
            let text = display_value(value);
            if text.chars().count() > *max_chars {
                let mut cut: String = text.chars().take(*max_chars).collect();
                cut.push('…');
                cut
            } else {
                text
            }
        }
        CellFormat::Text | CellFormat::Custom { .. } => display_value(value),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn format_timestamp(value: &Value, pattern: &str) -> String {
    let Value::String(text) = value else {
        return display_value(value);
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return timestamp.format(pattern).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.format(pattern).to_string();
    }
    text.clone()
}
