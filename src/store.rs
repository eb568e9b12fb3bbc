// ABOUTME: Shared admin state store with a pure reducer and explicit observer registration
// ABOUTME: Every dispatched action notifies all subscribers synchronously with the new state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

//! # Admin Store
//!
//! Replaces the global Redux-style store. Components hold an `Arc<AdminStore>`
//! and register a listener; nothing reads global mutable state. Listeners run
//! on the dispatching thread after the store lock is released, so a listener
//! may dispatch again.

use admin_panel_core::schema::Row;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Handle returned by [`AdminStore::subscribe`]
pub type SubscriptionId = u64;

type Listener = Arc<dyn Fn(&AdminState, &StoreAction) + Send + Sync>;

/// Per-entity slice of the shared state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitySlice {
    /// Most recently loaded page
    pub items: Vec<Row>,
    /// Backend total for the last load
    pub total: u64,
    /// Filters last applied by the table
    pub filters: BTreeMap<String, Value>,
    /// Bumped on every external invalidation
    pub revision: u64,
}

/// Whole store state keyed by entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    /// Slices by store key
    pub entities: HashMap<String, EntitySlice>,
}

impl AdminState {
    /// Slice for an entity, if any action has touched it
    #[must_use]
    pub fn entity(&self, key: &str) -> Option<&EntitySlice> {
        self.entities.get(key)
    }
}

/// Actions understood by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// A table finished loading a page
    ItemsLoaded {
        /// Store key
        entity: String,
        /// Loaded rows
        rows: Vec<Row>,
        /// Backend total
        total: u64,
    },
    /// A table changed its active filters
    FiltersChanged {
        /// Store key
        entity: String,
        /// Active filters
        filters: BTreeMap<String, Value>,
    },
    /// Data for the entity changed elsewhere; bound tables reload
    EntityChanged {
        /// Store key
        entity: String,
    },
}

impl StoreAction {
    /// Store key the action targets
    #[must_use]
    pub fn entity(&self) -> &str {
        match self {
            Self::ItemsLoaded { entity, .. }
            | Self::FiltersChanged { entity, .. }
            | Self::EntityChanged { entity } => entity,
        }
    }
}

/// Pure state transition
#[must_use]
pub fn reduce(mut state: AdminState, action: &StoreAction) -> AdminState {
    let slice = state.entities.entry(action.entity().to_owned()).or_default();
    match action {
        StoreAction::ItemsLoaded { rows, total, .. } => {
            slice.items.clone_from(rows);
            slice.total = *total;
        }
        StoreAction::FiltersChanged { filters, .. } => {
            slice.filters.clone_from(filters);
        }
        StoreAction::EntityChanged { .. } => {
            slice.revision += 1;
        }
    }
    state
}

struct StoreInner {
    state: Arc<AdminState>,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_id: SubscriptionId,
}

/// Shared state container
pub struct AdminStore {
    inner: Mutex<StoreInner>,
}

impl Default for AdminStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                state: Arc::new(AdminState::default()),
                listeners: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> Arc<AdminState> {
        Arc::clone(&self.lock().state)
    }

    /// Register a listener called after every dispatch
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&AdminState, &StoreAction) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Arc::new(listener));
        id
    }

    /// Remove a listener; unknown ids are ignored
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().listeners.remove(&id).is_some()
    }

    /// Number of registered listeners
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Apply an action and notify every listener
    pub fn dispatch(&self, action: StoreAction) {
        let (state, listeners) = {
            let mut inner = self.lock();
            let next = reduce((*inner.state).clone(), &action);
            inner.state = Arc::new(next);
            let listeners: Vec<Listener> = inner.listeners.values().cloned().collect();
            (Arc::clone(&inner.state), listeners)
        };

        debug!(
            store.entity = action.entity(),
            store.listeners = listeners.len(),
            "Store action dispatched"
        );
        for listener in listeners {
            listener(&state, &action);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_reducer_tracks_revision_and_items() {
        let row = Row::from_value(serde_json::json!({"id": 1})).unwrap();
        let state = reduce(
            AdminState::default(),
            &StoreAction::ItemsLoaded {
                entity: "orders".into(),
                rows: vec![row],
                total: 12,
            },
        );
        let state = reduce(
            state,
            &StoreAction::EntityChanged {
                entity: "orders".into(),
            },
        );

        let slice = state.entity("orders").unwrap();
        assert_eq!(slice.items.len(), 1);
        assert_eq!(slice.total, 12);
        assert_eq!(slice.revision, 1);
    }

    #[test]
    fn test_dispatch_notifies_every_subscriber_synchronously() {
        let store = AdminStore::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = {
            let calls = Arc::clone(&calls);
            store.subscribe(move |_, _| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };
        {
            let calls = Arc::clone(&calls);
            store.subscribe(move |state, action| {
                assert_eq!(state.entity(action.entity()).unwrap().revision, 1);
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }

        store.dispatch(StoreAction::EntityChanged {
            entity: "users".into(),
        });
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(store.unsubscribe(first));
        assert!(!store.unsubscribe(first));
        assert_eq!(store.subscriber_count(), 1);
    }
}
