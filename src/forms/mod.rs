// ABOUTME: Generic create/edit form engine driven entirely by a FormConfig descriptor
// ABOUTME: Tabbed inputs, per-field validation, typed payloads, and POST/PUT submission
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

//! # Forms Engine
//!
//! A [`FormEngine`] owns the raw input strings of every field across all tabs.
//! Switching tabs never discards input. Validation and the submitted payload
//! cover the active tab only.

/// Raw input and payload value conversions
pub mod payload;

/// Field validation pipeline
pub mod validation;

/// View model
pub mod view;

pub use validation::{FieldValidator, ValidatorRegistry};
pub use view::{FieldView, FormView, MessageKind, MessageView, OptionView, TabView, Widget};

use crate::client::{resource_path, ApiRequest, RestTransport};
use crate::errors::{AppError, AppResult};
use crate::events::{EventBus, FormMode, PanelEvent};
use admin_panel_core::constants::form::{ERROR_MESSAGE_MS, SUCCESS_MESSAGE_MS};
use admin_panel_core::schema::{FieldConfig, FieldKind, FormConfig, Row};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Result of a submit that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid,
    /// Backend accepted the row and returned this body
    Saved(Value),
}

#[derive(Debug, Clone)]
struct FlashMessage {
    kind: MessageKind,
    text: String,
    expires_at: Instant,
}

impl FlashMessage {
    fn new(kind: MessageKind, text: String) -> Self {
        let lifetime = match kind {
            MessageKind::Success => SUCCESS_MESSAGE_MS,
            MessageKind::Error => ERROR_MESSAGE_MS,
        };
        Self {
            kind,
            text,
            expires_at: Instant::now() + Duration::from_millis(lifetime),
        }
    }

    fn is_visible(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Form for one entity
pub struct FormEngine {
    transport: Arc<dyn RestTransport>,
    events: EventBus,
    validators: Arc<ValidatorRegistry>,
    config: Option<Arc<FormConfig>>,
    mode: FormMode,
    data: Option<Row>,
    current_tab: Option<String>,
    values: HashMap<String, String>,
    errors: BTreeMap<String, String>,
    message: Option<FlashMessage>,
}

impl FormEngine {
    /// Unconfigured form in create mode
    #[must_use]
    pub fn new(transport: Arc<dyn RestTransport>, events: EventBus) -> Self {
        Self {
            transport,
            events,
            validators: Arc::new(ValidatorRegistry::new()),
            config: None,
            mode: FormMode::Create,
            data: None,
            current_tab: None,
            values: HashMap::new(),
            errors: BTreeMap::new(),
            message: None,
        }
    }

    /// Use `validators` to resolve custom rules
    #[must_use]
    pub fn with_validators(mut self, validators: Arc<ValidatorRegistry>) -> Self {
        self.validators = validators;
        self
    }

    /// Bus this form emits on
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    /// Replace the descriptor and activate its first tab
    pub fn set_config(&mut self, config: FormConfig) {
        self.current_tab = config.tabs.first().map(|tab| tab.id.clone());
        self.config = Some(Arc::new(config));
        self.errors.clear();
        self.values.clear();
        self.prefill();
    }

    /// Parse a JSON descriptor and apply it
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` for malformed JSON; the current config is kept
    pub fn set_config_json(&mut self, json: &str) -> AppResult<()> {
        let config: FormConfig = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "Rejected form config");
            AppError::from(e)
        })?;
        self.set_config(config);
        Ok(())
    }

    /// Prefill every field of every tab from `row`
    pub fn set_data(&mut self, row: Row) {
        self.data = Some(row);
        self.prefill();
    }

    /// Parse a JSON row and prefill from it
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or a row without an integer id
    pub fn set_data_json(&mut self, json: &str) -> AppResult<()> {
        let value: Value = serde_json::from_str(json)?;
        self.set_data(Row::from_value(value)?);
        Ok(())
    }

    /// Forget the prefill row
    pub fn clear_data(&mut self) {
        self.data = None;
    }

    /// Switch between create and edit
    pub fn set_mode(&mut self, mode: FormMode) {
        self.mode = mode;
    }

    /// Parse and apply a textual mode (`create` / `edit`)
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for any other value
    pub fn set_mode_attr(&mut self, mode: &str) -> AppResult<()> {
        let mode = mode.parse::<FormMode>().map_err(AppError::invalid_input)?;
        self.set_mode(mode);
        Ok(())
    }

    /// Make `tab_id` the active tab; inputs of every tab are kept
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no tab has that id
    pub fn switch_tab(&mut self, tab_id: &str) -> AppResult<()> {
        let known = self.config.as_ref().is_some_and(|c| c.tab(tab_id).is_some());
        if !known {
            return Err(AppError::not_found(format!("Tab {tab_id}")));
        }
        self.current_tab = Some(tab_id.to_owned());
        Ok(())
    }

    /// Record user input for a field and clear its error
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no field has that id
    pub fn set_value(&mut self, field_id: &str, value: impl Into<String>) -> AppResult<()> {
        if self.field(field_id).is_none() {
            return Err(AppError::not_found(format!("Field {field_id}")));
        }
        self.errors.remove(field_id);
        self.values.insert(field_id.to_owned(), value.into());
        Ok(())
    }

    /// Validate one value against a field's rules
    #[must_use]
    pub fn validate_field(&self, field: &FieldConfig, value: &str) -> Option<String> {
        self.validators.validate_field(field, value)
    }

    /// Validate every field of the active tab, storing inline errors
    pub fn validate_form(&mut self) -> bool {
        let results: Vec<(String, Option<String>)> = self
            .active_fields()
            .iter()
            .map(|field| {
                let value = self.value(&field.id).unwrap_or_default();
                (field.id.clone(), self.validate_field(field, value))
            })
            .collect();

        let mut valid = true;
        for (id, error) in results {
            match error {
                Some(message) => {
                    valid = false;
                    self.errors.insert(id, message);
                }
                None => {
                    self.errors.remove(&id);
                }
            }
        }
        valid
    }

    /// Validate, then POST (create) or PUT (edit) the active tab's payload.
    ///
    /// A rejected save keeps every input so the user can correct and resubmit.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` without a config, `InvalidInput` in edit mode
    /// without a prefill row, and the transport or backend error otherwise
    pub async fn handle_submit(&mut self) -> AppResult<SubmitOutcome> {
        let Some(config) = self.config.clone() else {
            return Err(AppError::config("Form has no config"));
        };
        if !self.validate_form() {
            debug!(entity = %config.entity_name, errors = self.errors.len(), "Form invalid; not submitting");
            return Ok(SubmitOutcome::Invalid);
        }

        let payload = self.payload();
        let request = match self.mode {
            FormMode::Create => ApiRequest::post(config.api_endpoint.clone(), payload),
            FormMode::Edit => {
                let Some(id) = self.data.as_ref().map(Row::id) else {
                    return Err(AppError::invalid_input("Edit mode requires a row with an id"));
                };
                ApiRequest::put(resource_path(&config.api_endpoint, id), payload)
            }
        };

        let result = self
            .transport
            .execute(request.clone())
            .await
            .and_then(|response| response.error_for_status(&request));

        match result {
            Ok(response) => {
                let verb = match self.mode {
                    FormMode::Create => "created",
                    FormMode::Edit => "updated",
                };
                info!(entity = %config.entity_name, mode = %self.mode, "Form saved");
                self.message = Some(FlashMessage::new(
                    MessageKind::Success,
                    format!("{} {verb} successfully", config.entity_name),
                ));
                self.clear_inputs();
                self.events.emit(PanelEvent::FormSuccess {
                    data: response.body.clone(),
                    mode: self.mode,
                });
                Ok(SubmitOutcome::Saved(response.body))
            }
            Err(e) => {
                warn!(entity = %config.entity_name, error = %e, "Form save failed");
                self.message = Some(FlashMessage::new(
                    MessageKind::Error,
                    format!("Error saving {}: {}", config.entity_name, e.message),
                ));
                Err(e)
            }
        }
    }

    /// Clear inputs and errors, then emit `FormCancel`
    pub fn cancel(&mut self) {
        self.clear_inputs();
        self.events.emit(PanelEvent::FormCancel);
    }

    /// Back to a blank create form on the first tab
    pub fn reset(&mut self) {
        self.mode = FormMode::Create;
        self.data = None;
        self.message = None;
        self.clear_inputs();
        self.current_tab = self
            .config
            .as_ref()
            .and_then(|c| c.tabs.first())
            .map(|tab| tab.id.clone());
    }

    /// Build the render model
    #[must_use]
    pub fn render(&self) -> Option<FormView> {
        let config = self.config.as_ref()?;
        let active = self.current_tab.as_deref();

        let tabs = config
            .tabs
            .iter()
            .map(|tab| TabView {
                id: tab.id.clone(),
                label: tab.label.clone(),
                icon: tab.icon.clone(),
                active: Some(tab.id.as_str()) == active,
            })
            .collect();

        let fields = config
            .tabs
            .iter()
            .flat_map(|tab| {
                tab.fields.iter().map(move |field| (tab.id.as_str(), field))
            })
            .map(|(tab_id, field)| FieldView {
                tab_id: tab_id.to_owned(),
                id: field.id.clone(),
                label: field.label.clone(),
                required: field.required,
                visible: Some(tab_id) == active,
                widget: self.widget(field),
                error: self.errors.get(&field.id).cloned(),
            })
            .collect();

        Some(FormView {
            title: config.title.clone(),
            mode: self.mode,
            tabs,
            fields,
            submit_label: self.submit_label().unwrap_or_default(),
            message: self.message().map(|(kind, text)| MessageView {
                kind,
                text: text.to_owned(),
            }),
        })
    }

    /// `Create {entity}` or `Update {entity}`
    #[must_use]
    pub fn submit_label(&self) -> Option<String> {
        let config = self.config.as_ref()?;
        Some(match self.mode {
            FormMode::Create => format!("Create {}", config.entity_name),
            FormMode::Edit => format!("Update {}", config.entity_name),
        })
    }

    /// Current descriptor
    #[must_use]
    pub fn config(&self) -> Option<&FormConfig> {
        self.config.as_deref()
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Prefill row
    #[must_use]
    pub const fn data(&self) -> Option<&Row> {
        self.data.as_ref()
    }

    /// Active tab id
    #[must_use]
    pub fn current_tab(&self) -> Option<&str> {
        self.current_tab.as_deref()
    }

    /// Raw input of a field
    #[must_use]
    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.values.get(field_id).map(String::as_str)
    }

    /// Inline errors from the last validation
    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Message still within its display window
    #[must_use]
    pub fn message(&self) -> Option<(MessageKind, &str)> {
        self.message
            .as_ref()
            .filter(|m| m.is_visible())
            .map(|m| (m.kind, m.text.as_str()))
    }

    /// Payload the active tab would submit right now
    #[must_use]
    pub fn payload(&self) -> Value {
        let body: Map<String, Value> = self
            .active_fields()
            .iter()
            .map(|field| {
                let raw = self.value(&field.id).unwrap_or_default();
                (field.id.clone(), payload::from_input(&field.kind, raw))
            })
            .collect();
        Value::Object(body)
    }

    fn field(&self, field_id: &str) -> Option<&FieldConfig> {
        self.config.as_ref()?.all_fields().find(|f| f.id == field_id)
    }

    fn active_fields(&self) -> Vec<FieldConfig> {
        let (Some(config), Some(tab_id)) = (&self.config, &self.current_tab) else {
            return Vec::new();
        };
        config.tab(tab_id).map(|tab| tab.fields.clone()).unwrap_or_default()
    }

    fn prefill(&mut self) {
        let (Some(config), Some(row)) = (&self.config, &self.data) else {
            return;
        };
        self.values = config
            .all_fields()
            .map(|field| {
                let raw = row.get(&field.id).map(payload::to_input).unwrap_or_default();
                (field.id.clone(), raw)
            })
            .collect();
        self.errors.clear();
    }

    fn clear_inputs(&mut self) {
        self.values.clear();
        self.errors.clear();
    }

    fn widget(&self, field: &FieldConfig) -> Widget {
        let value = self.value(&field.id).unwrap_or_default().to_owned();
        match &field.kind {
            FieldKind::Textarea { rows } => Widget::Textarea {
                value,
                placeholder: field.placeholder.clone(),
                rows: *rows,
            },
            FieldKind::Select { options } => {
                let placeholder = OptionView {
                    value: String::new(),
                    label: view::SELECT_PLACEHOLDER.to_owned(),
                    selected: value.is_empty(),
                };
                let choices = options.iter().map(|option| OptionView {
                    value: option.value.clone(),
                    label: option.label.clone(),
                    selected: option.value == value,
                });
                Widget::Select {
                    options: std::iter::once(placeholder).chain(choices).collect(),
                }
            }
            FieldKind::Checkbox => Widget::Checkbox {
                checked: payload::is_checked(&value),
            },
            FieldKind::Number { min, max } => Widget::Input {
                input_type: field.kind.input_type(),
                value,
                placeholder: field.placeholder.clone(),
                min: *min,
                max: *max,
            },
            other => Widget::Input {
                input_type: other.input_type(),
                value,
                placeholder: field.placeholder.clone(),
                min: None,
                max: None,
            },
        }
    }
}
