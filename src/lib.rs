// ABOUTME: Main library entry point for the configuration-driven admin panel engine
// ABOUTME: Generic datatable and form engines over a REST CRUD backend, composed per entity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

#![deny(unsafe_code)]

//! # Admin Panel
//!
//! A headless multi-tenant admin panel. Declarative descriptors from
//! `admin_panel_core::schema` drive two reusable engines:
//!
//! - **Datatable**: fetches paged rows, searches with a debounce, filters,
//!   sorts, paginates, and emits row events
//! - **Forms**: tabbed create/edit forms with per-field validation and typed
//!   POST/PUT payloads
//!
//! An [`shell::EntityShell`] composes one of each per entity and switches
//! between them. Every component re-derives a view model from its state on
//! demand; hosts draw from the view model.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use admin_panel::client::HttpTransport;
//! use admin_panel::config::PanelConfig;
//! use admin_panel::entities::EntityKind;
//! use admin_panel::errors::AppResult;
//! use admin_panel::shell::{Confirm, EntityShell, LogNotifier};
//! use std::sync::Arc;
//!
//! struct AlwaysYes;
//!
//! #[async_trait::async_trait]
//! impl Confirm for AlwaysYes {
//!     async fn confirm(&self, _message: &str) -> bool {
//!         true
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = PanelConfig::from_env()?;
//!     let transport = Arc::new(HttpTransport::new((&config).into())?);
//!     let mut shell = EntityShell::for_entity(
//!         transport,
//!         EntityKind::Orders.definition(),
//!         Arc::new(AlwaysYes),
//!     )
//!     .notifier(Arc::new(LogNotifier))
//!     .build();
//!
//!     shell.mount().await?;
//!     println!("{}", shell.table().render());
//!     Ok(())
//! }
//! ```

/// REST transport abstraction and HTTP client
pub mod client;

/// Environment-based configuration
pub mod config;

/// Generic datatable engine
pub mod datatable;

/// Single-slot search debouncer
pub mod debounce;

/// Built-in users, orders, and promoters definitions
pub mod entities;

/// Unified error types
pub mod errors;

/// In-process event bus
pub mod events;

/// Generic forms engine
pub mod forms;

/// Structured logging setup
pub mod logging;

/// Shared admin state store
pub mod store;

/// Entity shell composing a table and a form
pub mod shell;

/// Scripted collaborators for tests
pub mod test_utils;
