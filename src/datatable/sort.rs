// ABOUTME: Column sort state and the raw-value comparator used by the datatable
// ABOUTME: Clicking the same column toggles direction; a new column starts ascending
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use admin_panel_core::schema::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl SortDirection {
    /// The other direction
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Column key
    pub column: String,
    /// Direction
    pub direction: SortDirection,
}

impl SortState {
    /// Sort state after a header click on `column`
    #[must_use]
    pub fn after_click(current: Option<&Self>, column: &str) -> Self {
        match current {
            Some(state) if state.column == column => Self {
                column: column.to_owned(),
                direction: state.direction.toggled(),
            },
            _ => Self {
                column: column.to_owned(),
                direction: SortDirection::Asc,
            },
        }
    }
}

/// Compare two raw cell values.
///
/// Numbers compare numerically, strings lexicographically, booleans with
/// `false < true`. Missing values and mixed types compare equal.
#[must_use]
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .zip(b.as_f64())
            .and_then(|(a, b)| a.partial_cmp(&b))
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// Sort rows in place by the state's column
pub fn sort_rows(rows: &mut [Row], sort: &SortState) {
    rows.sort_by(|a, b| {
        let ordering = compare_values(a.get(&sort.column), b.get(&sort.column));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
