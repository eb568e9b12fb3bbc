// ABOUTME: Integration tests for the shared admin store and its datatable binding
// ABOUTME: Covers published loads and filters, invalidation-driven reloads, and unsubscription
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use admin_panel::client::RestTransport;
use admin_panel::datatable::DataTable;
use admin_panel::store::{AdminStore, StoreAction};
use admin_panel::test_utils::MockTransport;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn bound_table() -> (Arc<MockTransport>, Arc<AdminStore>, DataTable) {
    common::init_test_logging();
    let transport = MockTransport::shared();
    let store = Arc::new(AdminStore::new());
    let table = DataTable::builder(Arc::clone(&transport) as Arc<dyn RestTransport>)
        .store(Arc::clone(&store))
        .build();
    (transport, store, table)
}

fn bound_config() -> admin_panel_core::schema::TableConfig {
    let mut config = common::items_table(10);
    config.store_key = Some("items".into());
    config
}

#[tokio::test]
async fn test_loads_and_filters_are_published() {
    let (transport, store, table) = bound_table();
    transport.push_rows(json!([{"id": 1, "name": "Ada"}]), 41);

    table.set_config(bound_config()).await.unwrap();
    table.on_filter_change("name", json!("ad")).await.unwrap();

    let snapshot = store.snapshot();
    let slice = snapshot.entity("items").unwrap();
    assert_eq!(slice.filters.get("name"), Some(&json!("ad")));
    // The filtered reload answered with the default empty page
    assert_eq!(slice.total, 0);
    assert!(slice.items.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_entity_change_reloads_bound_table() {
    let (transport, store, table) = bound_table();
    table.set_config(bound_config()).await.unwrap();
    assert_eq!(transport.request_count(), 1);

    transport.push_rows(json!([{"id": 5, "name": "new"}]), 1);
    store.dispatch(StoreAction::EntityChanged {
        entity: "items".into(),
    });
    store.dispatch(StoreAction::EntityChanged {
        entity: "other".into(),
    });
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(transport.request_count(), 2);
    assert_eq!(table.items()[0].id(), 5);
    assert_eq!(store.snapshot().entity("items").unwrap().revision, 1);
}

#[tokio::test]
async fn test_dropping_table_unsubscribes() {
    let (_transport, store, table) = bound_table();
    table.set_config(bound_config()).await.unwrap();
    assert_eq!(store.subscriber_count(), 1);

    let mut other = bound_config();
    other.store_key = Some("others".into());
    table.set_config(other).await.unwrap();
    assert_eq!(store.subscriber_count(), 1, "rebinding replaces the listener");

    drop(table);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn test_listeners_see_state_after_the_action() {
    let store = Arc::new(AdminStore::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let id = store.subscribe(move |state, action| {
        assert_eq!(action.entity(), "orders");
        assert_eq!(state.entity("orders").unwrap().revision, 1);
        seen.fetch_add(1, Ordering::SeqCst);
    });

    store.dispatch(StoreAction::EntityChanged {
        entity: "orders".into(),
    });
    assert!(store.unsubscribe(id));
    store.dispatch(StoreAction::EntityChanged {
        entity: "orders".into(),
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!store.unsubscribe(id));
}
