// ABOUTME: Form-side descriptors: field kinds, validation rules, tabs, and form config
// ABOUTME: Field kinds form a closed set; validation rules resolve through a registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use super::table::SelectOption;
use serde::{Deserialize, Serialize};

/// Input widget kind of a form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Email address, format-checked before custom rules
    Email,
    /// Masked text
    Password,
    /// Phone number
    Tel,
    /// URL
    Url,
    /// Numeric input, submitted as a JSON number
    Number {
        /// Lower bound hint
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Upper bound hint
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Date input (`YYYY-MM-DD`)
    Date,
    /// Multi-line text
    Textarea {
        /// Visible line count
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<u32>,
    },
    /// Fixed choices preceded by an empty placeholder
    Select {
        /// Choices offered
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    /// Boolean toggle, submitted as a JSON bool
    Checkbox,
}

impl FieldKind {
    /// HTML-style input type name of the widget
    #[must_use]
    pub const fn input_type(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Number { .. } => "number",
            Self::Date => "date",
            Self::Textarea { .. } => "textarea",
            Self::Select { .. } => "select",
            Self::Checkbox => "checkbox",
        }
    }
}

/// Field-level validation step, run after the required and email checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum ValidationRule {
    /// At least `min` characters
    MinLength {
        /// Minimum character count
        min: usize,
    },
    /// At most `max` characters
    MaxLength {
        /// Maximum character count
        max: usize,
    },
    /// Whole value must match a regular expression
    Pattern {
        /// Regular expression
        pattern: String,
        /// Error shown on mismatch
        message: String,
    },
    /// Numeric value within bounds
    Range {
        /// Inclusive lower bound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive upper bound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Validator registered by the host under a name
    Custom {
        /// Registry key
        name: String,
    },
}

/// One form input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Payload key and row property
    pub id: String,
    /// Label text
    pub label: String,
    /// Widget kind
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Placeholder text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Empty values are rejected
    #[serde(default)]
    pub required: bool,
    /// Extra validation steps, run in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
}

impl FieldConfig {
    /// Optional field without rules
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            placeholder: None,
            required: false,
            validation: Vec::new(),
        }
    }

    /// Mark the field required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the placeholder
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Append a validation rule
    #[must_use]
    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }
}

/// Named group of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabConfig {
    /// Tab identifier
    pub id: String,
    /// Tab label
    pub label: String,
    /// Optional icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Fields shown in this tab
    pub fields: Vec<FieldConfig>,
}

/// Descriptor driving one form instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Heading shown above the form
    pub title: String,
    /// Collection endpoint; updates go to `{api_endpoint}/{id}`
    pub api_endpoint: String,
    /// Singular entity name used in labels and messages
    pub entity_name: String,
    /// Tabs in order; the first is active initially
    pub tabs: Vec<TabConfig>,
}

impl FormConfig {
    /// Look up a tab by id
    #[must_use]
    pub fn tab(&self, id: &str) -> Option<&TabConfig> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    /// Every field across all tabs
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldConfig> {
        self.tabs.iter().flat_map(|tab| tab.fields.iter())
    }
}
