// ABOUTME: Table-side descriptors: columns, cell formats, filter controls, and table config
// ABOUTME: Serialized in camelCase so descriptors can be supplied as JSON attributes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use crate::constants::table::DEFAULT_ITEMS_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One choice of a select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value
    pub value: String,
    /// Displayed label
    pub label: String,
}

impl SelectOption {
    /// Create an option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// How a cell value is turned into display text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "camelCase")]
pub enum CellFormat {
    /// Stringify as-is
    Text,
    /// Fixed number of decimals
    Number {
        /// Digits after the decimal point
        decimals: u8,
    },
    /// Currency symbol prefix with fixed decimals
    Currency {
        /// Symbol placed before the amount
        symbol: String,
        /// Digits after the decimal point
        decimals: u8,
    },
    /// RFC 3339 / ISO date rendered as `YYYY-MM-DD`
    Date,
    /// RFC 3339 timestamp rendered as `YYYY-MM-DD HH:MM`
    DateTime,
    /// Boolean rendered as one of two labels
    #[serde(rename_all = "camelCase")]
    Boolean {
        /// Label for `true`
        true_label: String,
        /// Label for `false`
        false_label: String,
    },
    /// Value looked up in a label map, falling back to the raw value
    Badge {
        /// Raw value to label
        labels: BTreeMap<String, String>,
    },
    /// Cut long text to a maximum number of characters
    #[serde(rename_all = "camelCase")]
    Truncate {
        /// Maximum characters before an ellipsis
        max_chars: usize,
    },
    /// Renderer registered by the host under a name
    Custom {
        /// Registry key
        name: String,
    },
}

/// One visible datatable column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Property path read off each row
    pub key: String,
    /// Header text
    pub label: String,
    /// Whether the header offers sorting
    #[serde(default)]
    pub sortable: bool,
    /// Optional display transform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<CellFormat>,
}

impl ColumnConfig {
    /// Plain, non-sortable column
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            render: None,
        }
    }

    /// Mark the column sortable
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Attach a display transform
    #[must_use]
    pub fn render(mut self, format: CellFormat) -> Self {
        self.render = Some(format);
        self
    }
}

/// Kind of a filter control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterKind {
    /// Free text input
    Text,
    /// Fixed choices
    Select {
        /// Choices offered
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    /// Date picker (`YYYY-MM-DD`)
    Date,
}

/// One filter control above the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Row property and query parameter name
    pub key: String,
    /// Control label
    pub label: String,
    /// Control kind
    #[serde(flatten)]
    pub kind: FilterKind,
}

impl FilterConfig {
    /// Create a filter
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
        }
    }
}

const fn default_items_per_page() -> u32 {
    DEFAULT_ITEMS_PER_PAGE
}

/// Descriptor driving one datatable instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// Collection endpoint, e.g. `/api/orders`
    pub api_endpoint: String,
    /// Visible columns in order
    pub columns: Vec<ColumnConfig>,
    /// Filter controls
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
    /// Rows per page
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,
    /// Heading shown above the table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// State-store slice this table publishes to and listens on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_key: Option<String>,
}

impl TableConfig {
    /// Look up a column by key
    #[must_use]
    pub fn column(&self, key: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// Look up a filter by key
    #[must_use]
    pub fn filter(&self, key: &str) -> Option<&FilterConfig> {
        self.filters.iter().find(|filter| filter.key == key)
    }
}
