// ABOUTME: Render model of a form: tab strip, widgets per field, inline errors, flash message
// ABOUTME: Hosts draw from this; Display gives a plain-text rendering for terminals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use crate::events::FormMode;
use serde::Serialize;
use std::fmt;

/// Label of the empty option that precedes every select's choices
pub const SELECT_PLACEHOLDER: &str = "Select...";

/// Kind of transient message shown after a submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Row saved
    Success,
    /// Save failed
    Error,
}

/// One tab in the strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    /// Tab id
    pub id: String,
    /// Label
    pub label: String,
    /// Icon name
    pub icon: Option<String>,
    /// Whether this is the active tab
    pub active: bool,
}

/// One select choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    /// Submitted value
    pub value: String,
    /// Label
    pub label: String,
    /// Matches the current value
    pub selected: bool,
}

/// Widget for one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "lowercase")]
pub enum Widget {
    /// Single-line input of the given type
    Input {
        /// `text`, `email`, `number`, ...
        input_type: &'static str,
        /// Current value
        value: String,
        /// Placeholder
        placeholder: Option<String>,
        /// Lower bound for number inputs
        min: Option<f64>,
        /// Upper bound for number inputs
        max: Option<f64>,
    },
    /// Multi-line input
    Textarea {
        /// Current value
        value: String,
        /// Placeholder
        placeholder: Option<String>,
        /// Visible lines
        rows: Option<u32>,
    },
    /// Choice list; the first option is always the empty placeholder
    Select {
        /// Options including the placeholder
        options: Vec<OptionView>,
    },
    /// Toggle
    Checkbox {
        /// Current state
        checked: bool,
    },
}

/// One field with its widget and inline error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    /// Owning tab
    pub tab_id: String,
    /// Field id
    pub id: String,
    /// Label
    pub label: String,
    /// Required marker
    pub required: bool,
    /// Only fields of the active tab are visible
    pub visible: bool,
    /// Input widget
    pub widget: Widget,
    /// Inline error message
    pub error: Option<String>,
}

/// Transient message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    /// Success or error
    pub kind: MessageKind,
    /// Text
    pub text: String,
}

/// Complete form render model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    /// Heading
    pub title: String,
    /// Create or edit
    pub mode: FormMode,
    /// Tab strip
    pub tabs: Vec<TabView>,
    /// Fields of every tab
    pub fields: Vec<FieldView>,
    /// `Create {entity}` or `Update {entity}`
    pub submit_label: String,
    /// Message still within its display window
    pub message: Option<MessageView>,
}

impl FormView {
    /// Fields of the active tab
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldView> {
        self.fields.iter().filter(|field| field.visible)
    }

    /// Look up a field by id
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldView> {
        self.fields.iter().find(|field| field.id == id)
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input {
                input_type,
                value,
                placeholder,
                ..
            } => {
                let shown = if value.is_empty() {
                    placeholder.as_deref().unwrap_or_default()
                } else {
                    value.as_str()
                };
                write!(f, "[{shown}] ({input_type})")
            }
            Self::Textarea { value, .. } => write!(f, "[{value}] (textarea)"),
            Self::Select { options } => {
                let chosen = options
                    .iter()
                    .find(|option| option.selected)
                    .map_or(SELECT_PLACEHOLDER, |option| option.label.as_str());
                let labels: Vec<&str> = options.iter().skip(1).map(|o| o.label.as_str()).collect();
                write!(f, "<{chosen}> ({})", labels.join(" | "))
            }
            Self::Checkbox { checked } => write!(f, "[{}]", if *checked { "x" } else { " " }),
        }
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.tabs.len() > 1 {
            let strip: Vec<String> = self
                .tabs
                .iter()
                .map(|tab| {
                    if tab.active {
                        format!("[{}]", tab.label)
                    } else {
                        tab.label.clone()
                    }
                })
                .collect();
            writeln!(f, "{}", strip.join("  "))?;
        }
        for field in self.visible_fields() {
            let marker = if field.required { " *" } else { "" };
            writeln!(f, "  {}{marker}: {}", field.label, field.widget)?;
            if let Some(error) = &field.error {
                writeln!(f, "    ! {error}")?;
            }
        }
        if let Some(message) = &self.message {
            writeln!(f, "  {}", message.text)?;
        }
        write!(f, "  <{}>", self.submit_label)
    }
}
