// ABOUTME: Supplementary client-side filter pass over an already server-filtered page
// ABOUTME: String values match as case-insensitive substrings; other values match exactly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use super::format::display_value;
use admin_panel_core::schema::Row;
use serde_json::Value;
use std::collections::BTreeMap;

/// Whether a filter value constrains anything; null and blank strings do not
#[must_use]
pub fn is_active(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        _ => true,
    }
}

/// Whether `row` satisfies one filter
#[must_use]
pub fn row_matches(row: &Row, key: &str, expected: &Value) -> bool {
    let Some(actual) = row.get(key) else {
        return false;
    };
    match (expected, actual) {
        (Value::String(needle), _) => display_value(actual)
            .to_lowercase()
            .contains(&needle.trim().to_lowercase()),
        (Value::Number(expected), Value::Number(actual)) => expected.as_f64() == actual.as_f64(),
        _ => expected == actual,
    }
}

/// Rows of `items` satisfying every active filter, in their original order
#[must_use]
pub fn apply_filters(items: &[Row], filters: &BTreeMap<String, Value>) -> Vec<Row> {
    let active: Vec<(&String, &Value)> = filters.iter().filter(|(_, v)| is_active(v)).collect();
    if active.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|row| active.iter().all(|(key, value)| row_matches(row, key, value)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Row> {
        [
            json!({"id": 1, "name": "Ada Lovelace", "status": "paid", "qty": 2, "vip": true}),
            json!({"id": 2, "name": "Grace Hopper", "status": "pending", "qty": 5, "vip": false}),
            json!({"id": 3, "name": "alan turing", "status": "PAID", "qty": 2.0}),
        ]
        .into_iter()
        .map(|v| Row::from_value(v).unwrap())
        .collect()
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter().map(Row::id).collect()
    }

    #[test]
    fn test_string_filters_are_case_insensitive_substrings() {
        let filters = BTreeMap::from([("name".to_owned(), json!("A"))]);
        assert_eq!(ids(&apply_filters(&rows(), &filters)), vec![1, 2, 3]);

        let filters = BTreeMap::from([("status".to_owned(), json!("paid"))]);
        assert_eq!(ids(&apply_filters(&rows(), &filters)), vec![1, 3]);
    }

    #[test]
    fn test_non_string_filters_match_exactly() {
        let filters = BTreeMap::from([("qty".to_owned(), json!(2))]);
        assert_eq!(ids(&apply_filters(&rows(), &filters)), vec![1, 3]);

        let filters = BTreeMap::from([("vip".to_owned(), json!(false))]);
        assert_eq!(ids(&apply_filters(&rows(), &filters)), vec![2]);
    }

    #[test]
    fn test_inactive_filters_are_ignored_and_missing_keys_fail() {
        let filters = BTreeMap::from([
            ("status".to_owned(), json!("")),
            ("name".to_owned(), Value::Null),
        ]);
        assert_eq!(apply_filters(&rows(), &filters).len(), 3);

        let filters = BTreeMap::from([("vip".to_owned(), json!(true))]);
        assert_eq!(ids(&apply_filters(&rows(), &filters)), vec![1]);
    }
}
