// ABOUTME: Builds the list query string sent to the backend for one table load
// ABOUTME: Emits page, limit, offset, optional search, then active filters in key order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use super::filter::is_active;
use super::format::display_value;
use admin_panel_core::constants::query;
use admin_panel_core::pagination::PageRequest;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

const RESERVED: [&str; 4] = [query::PAGE, query::LIMIT, query::OFFSET, query::SEARCH];

/// Query parameters for one list request
#[must_use]
pub fn build_query(
    page: PageRequest,
    search: Option<&str>,
    filters: &BTreeMap<String, Value>,
) -> Vec<(String, String)> {
    let mut params = vec![
        (query::PAGE.to_owned(), page.page.to_string()),
        (query::LIMIT.to_owned(), page.limit.to_string()),
        (query::OFFSET.to_owned(), page.offset().to_string()),
    ];

    if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
        params.push((query::SEARCH.to_owned(), term.to_owned()));
    }

    for (key, value) in filters {
        if RESERVED.contains(&key.as_str()) {
            debug!(filter = %key, "Skipping filter that collides with a paging parameter");
            continue;
        }
        if is_active(value) {
            params.push((key.clone(), display_value(value).trim().to_owned()));
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_contains_paging_search_and_active_filters() {
        let filters = BTreeMap::from([
            ("status".to_owned(), json!("paid")),
            ("promoter_id".to_owned(), json!(7)),
            ("empty".to_owned(), json!("  ")),
            ("none".to_owned(), Value::Null),
            ("limit".to_owned(), json!(999)),
        ]);

        let params = build_query(PageRequest::new(3, 20), Some("  ada "), &filters);
        let expected: Vec<(String, String)> = [
            ("page", "3"),
            ("limit", "20"),
            ("offset", "40"),
            ("search", "ada"),
            ("promoter_id", "7"),
            ("status", "paid"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
        assert_eq!(params, expected);
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let params = build_query(PageRequest::new(1, 10), Some("   "), &BTreeMap::new());
        assert!(params.iter().all(|(key, _)| key != "search"));
    }
}
