// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging and small table/form descriptors used across suites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::wildcard_in_or_patterns
)]
//! Shared test utilities for `admin_panel`

use admin_panel::client::RestTransport;
use admin_panel::datatable::DataTable;
use admin_panel::test_utils::MockTransport;
use admin_panel_core::schema::{
    ColumnConfig, FieldConfig, FieldKind, FormConfig, TabConfig, TableConfig,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// `id` + `name` table over `/api/items`
pub fn items_table(items_per_page: u32) -> TableConfig {
    TableConfig {
        api_endpoint: "/api/items".into(),
        columns: vec![
            ColumnConfig::new("id", "ID").sortable(),
            ColumnConfig::new("name", "Name").sortable(),
        ],
        filters: Vec::new(),
        items_per_page,
        title: Some("Items".into()),
        store_key: None,
    }
}

/// Two-tab form over `/api/items`: a required name and email, then an optional
/// quantity and a newsletter checkbox
pub fn items_form() -> FormConfig {
    FormConfig {
        title: "Item".into(),
        api_endpoint: "/api/items".into(),
        entity_name: "Item".into(),
        tabs: vec![
            TabConfig {
                id: "main".into(),
                label: "Main".into(),
                icon: None,
                fields: vec![
                    FieldConfig::new("name", "Name", FieldKind::Text).required(),
                    FieldConfig::new("email", "Email", FieldKind::Email).required(),
                ],
            },
            TabConfig {
                id: "extra".into(),
                label: "Extra".into(),
                icon: None,
                fields: vec![
                    FieldConfig::new("quantity", "Quantity", FieldKind::Number { min: None, max: None }),
                    FieldConfig::new("newsletter", "Newsletter", FieldKind::Checkbox),
                    FieldConfig::new("notes", "Notes", FieldKind::Textarea { rows: None }).required(),
                ],
            },
        ],
    }
}

/// Unconfigured table over a fresh mock transport
pub fn mock_table() -> (Arc<MockTransport>, DataTable) {
    init_test_logging();
    let transport = MockTransport::shared();
    let table = DataTable::builder(Arc::clone(&transport) as Arc<dyn RestTransport>).build();
    (transport, table)
}
