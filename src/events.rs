// ABOUTME: In-process event bus connecting the datatable, the forms engine, and the entity shell
// ABOUTME: Fire-and-forget broadcast with synchronous send and no acknowledgment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use admin_panel_core::schema::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tokio::sync::broadcast;
use tracing::trace;

/// Buffered events per subscriber before the slowest one starts lagging
const EVENT_BUFFER: usize = 64;

/// Whether a form creates a new row or updates an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// POST to the collection endpoint
    #[default]
    Create,
    /// PUT to `{endpoint}/{id}`
    Edit,
}

impl FromStr for FormMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            other => Err(format!("unknown form mode `{other}`")),
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Edit => write!(f, "edit"),
        }
    }
}

/// Row-level action requested from the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowActionKind {
    /// Open the row in the form
    Edit,
    /// Remove the row
    Delete,
    /// Show the row read-only
    View,
}

/// Messages exchanged between the engines and their host
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A row was clicked
    RowClick {
        /// The clicked row
        item: Row,
        /// Its id
        id: i64,
    },
    /// A row action button was pressed
    RowAction {
        /// Requested action
        action: RowActionKind,
        /// Target row
        data: Row,
    },
    /// A form submission succeeded
    FormSuccess {
        /// Row returned by the backend
        data: Value,
        /// Mode the form was in
        mode: FormMode,
    },
    /// The form was dismissed
    FormCancel,
}

/// Cloneable sending side shared by every component of one entity shell
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PanelEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Create a bus with no subscribers
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER);
        Self { sender }
    }

    /// Start receiving events emitted from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.sender.subscribe()
    }

    /// Emit an event; having no listener is not an error
    pub fn emit(&self, event: PanelEvent) {
        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            trace!(?event, "Event emitted with no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_form_mode_parsing() {
        assert_eq!("edit".parse::<FormMode>(), Ok(FormMode::Edit));
        assert_eq!(" Create ".parse::<FormMode>(), Ok(FormMode::Create));
        assert!("update".parse::<FormMode>().is_err());
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.emit(PanelEvent::FormCancel);

        let mut receiver = bus.subscribe();
        bus.emit(PanelEvent::FormCancel);
        assert_eq!(receiver.try_recv().unwrap(), PanelEvent::FormCancel);
        assert!(receiver.try_recv().is_err());
    }
}
