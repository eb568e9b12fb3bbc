// ABOUTME: Entity shell composing one datatable and one form behind a table/form view switch
// ABOUTME: Routes row actions and form outcomes from the shared event bus; owns the delete flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

//! # Entity Shell
//!
//! Control flow: the table is shown first. A create or edit request swaps in
//! the form with the right mode and prefill row. A successful save swaps back
//! and refreshes the table. Deletes ask a [`Confirm`] collaborator first and
//! report failures through a [`Notifier`].

use crate::client::{resource_path, ApiRequest, RestTransport};
use crate::datatable::{DataTable, LoadOutcome, RendererRegistry};
use crate::entities::EntityDefinition;
use crate::errors::{AppError, AppResult};
use crate::events::{EventBus, FormMode, PanelEvent, RowActionKind};
use crate::forms::{FormEngine, ValidatorRegistry};
use crate::store::AdminStore;
use admin_panel_core::schema::{FormConfig, Row, TableConfig};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, error, info, warn};

/// Blocking yes/no question asked before destructive actions
#[async_trait]
pub trait Confirm: Send + Sync {
    /// `true` to proceed
    async fn confirm(&self, message: &str) -> bool;
}

/// Surface for failures the user must acknowledge
pub trait Notifier: Send + Sync {
    /// Show an alert
    fn alert(&self, message: &str);
}

/// Notifier that writes alerts to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        error!(alert = %message, "User alert");
    }
}

/// Which half of the shell is showing
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ShellView {
    /// Datatable
    #[default]
    Table,
    /// Form, with the row being edited in edit mode
    Form {
        /// Create or edit
        mode: FormMode,
        /// Row being edited
        selected: Option<Row>,
    },
}

/// Outcome of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// User declined; nothing was sent
    Declined,
    /// Backend removed the row
    Deleted,
}

/// Builder for [`EntityShell`]
pub struct EntityShellBuilder {
    transport: Arc<dyn RestTransport>,
    table_config: TableConfig,
    form_config: FormConfig,
    confirm: Arc<dyn Confirm>,
    notifier: Arc<dyn Notifier>,
    renderers: Arc<RendererRegistry>,
    validators: Arc<ValidatorRegistry>,
    store: Option<Arc<AdminStore>>,
    table_page_size: Option<u32>,
    search_debounce: Option<Duration>,
}

impl EntityShellBuilder {
    /// Cell renderers for custom column formats
    #[must_use]
    pub fn renderers(mut self, renderers: Arc<RendererRegistry>) -> Self {
        self.renderers = renderers;
        self
    }

    /// Validators for custom field rules
    #[must_use]
    pub fn validators(mut self, validators: Arc<ValidatorRegistry>) -> Self {
        self.validators = validators;
        self
    }

    /// Where alerts go
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Shared store the table publishes to
    #[must_use]
    pub fn store(mut self, store: Arc<AdminStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the table's rows per page
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.table_page_size = Some(page_size);
        self
    }

    /// Override the table's search debounce period
    #[must_use]
    pub const fn search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = Some(debounce);
        self
    }

    /// Assemble the shell; call [`EntityShell::mount`] to load the first page
    #[must_use]
    pub fn build(self) -> EntityShell {
        let events = EventBus::new();
        let receiver = events.subscribe();

        let mut table = DataTable::builder(Arc::clone(&self.transport))
            .events(events.clone())
            .renderers(self.renderers);
        if let Some(store) = self.store {
            table = table.store(store);
        }
        if let Some(debounce) = self.search_debounce {
            table = table.debounce(debounce);
        }

        let mut form = FormEngine::new(Arc::clone(&self.transport), events.clone())
            .with_validators(self.validators);
        form.set_config(self.form_config);

        let mut table_config = self.table_config;
        if let Some(page_size) = self.table_page_size {
            table_config.items_per_page = page_size;
        }

        EntityShell {
            transport: self.transport,
            table: table.build(),
            table_config: Some(table_config),
            form,
            confirm: self.confirm,
            notifier: self.notifier,
            receiver,
            view: ShellView::Table,
        }
    }
}

/// One entity's table and form wired together
pub struct EntityShell {
    transport: Arc<dyn RestTransport>,
    table: DataTable,
    table_config: Option<TableConfig>,
    form: FormEngine,
    confirm: Arc<dyn Confirm>,
    notifier: Arc<dyn Notifier>,
    receiver: broadcast::Receiver<PanelEvent>,
    view: ShellView,
}

impl EntityShell {
    /// Start building a shell from raw descriptors
    pub fn builder(
        transport: Arc<dyn RestTransport>,
        table_config: TableConfig,
        form_config: FormConfig,
        confirm: Arc<dyn Confirm>,
    ) -> EntityShellBuilder {
        EntityShellBuilder {
            transport,
            table_config,
            form_config,
            confirm,
            notifier: Arc::new(LogNotifier),
            renderers: Arc::new(RendererRegistry::new()),
            validators: Arc::new(ValidatorRegistry::new()),
            store: None,
            table_page_size: None,
            search_debounce: None,
        }
    }

    /// Start building a shell for a built-in entity, with its registries
    pub fn for_entity(
        transport: Arc<dyn RestTransport>,
        definition: &EntityDefinition,
        confirm: Arc<dyn Confirm>,
    ) -> EntityShellBuilder {
        Self::builder(transport, definition.table.clone(), definition.form.clone(), confirm)
            .renderers(Arc::new(crate::entities::renderers()))
            .validators(Arc::new(crate::entities::validators()))
    }

    /// Hand the table its config and load the first page
    ///
    /// # Errors
    ///
    /// Returns an error if the first fetch fails; the table stays empty
    pub async fn mount(&mut self) -> AppResult<LoadOutcome> {
        match self.table_config.take() {
            Some(config) => self.table.set_config(config).await,
            None => self.table.refresh().await,
        }
    }

    /// Current view
    #[must_use]
    pub const fn view(&self) -> &ShellView {
        &self.view
    }

    /// The datatable
    #[must_use]
    pub const fn table(&self) -> &DataTable {
        &self.table
    }

    /// The form
    #[must_use]
    pub const fn form(&self) -> &FormEngine {
        &self.form
    }

    /// The form, for input and submission
    pub fn form_mut(&mut self) -> &mut FormEngine {
        &mut self.form
    }

    /// Show a blank create form
    pub fn create(&mut self) {
        self.form.reset();
        self.form.set_mode(FormMode::Create);
        self.view = ShellView::Form {
            mode: FormMode::Create,
            selected: None,
        };
    }

    /// Show the form prefilled with `row` in edit mode
    pub fn edit(&mut self, row: Row) {
        self.form.reset();
        self.form.set_mode(FormMode::Edit);
        self.form.set_data(row.clone());
        self.view = ShellView::Form {
            mode: FormMode::Edit,
            selected: Some(row),
        };
    }

    /// Back to the table, then reload it
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh fails
    pub async fn on_form_success(&mut self) -> AppResult<LoadOutcome> {
        self.view = ShellView::Table;
        self.table.refresh().await
    }

    /// Back to the table without reloading
    pub fn on_form_cancel(&mut self) {
        self.view = ShellView::Table;
    }

    /// Ask for confirmation, DELETE the row, then refresh the table.
    ///
    /// Failures are alerted and leave the table as it was.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error of a failed DELETE
    pub async fn delete(&mut self, row: &Row) -> AppResult<DeleteOutcome> {
        let entity = self
            .form
            .config()
            .map_or_else(|| "item".to_owned(), |c| c.entity_name.to_lowercase());
        let prompt = format!("Are you sure you want to delete this {entity}?");
        if !self.confirm.confirm(&prompt).await {
            debug!(id = row.id(), "Delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let Some(endpoint) = self.endpoint() else {
            let e = AppError::config("Shell has no table endpoint");
            self.notifier.alert(&format!("Error deleting {entity}: {}", e.message));
            return Err(e);
        };
        let request = ApiRequest::delete(resource_path(&endpoint, row.id()));
        let result = self
            .transport
            .execute(request.clone())
            .await
            .and_then(|response| response.error_for_status(&request));

        if let Err(e) = result {
            warn!(id = row.id(), error = %e, "Delete failed");
            self.notifier.alert(&format!("Error deleting {entity}: {}", e.message));
            return Err(e);
        }

        info!(id = row.id(), path = %request.path, "Row deleted");
        if let Err(e) = self.table.refresh().await {
            warn!(error = %e, "Refresh after delete failed");
        }
        Ok(DeleteOutcome::Deleted)
    }

    /// Handle every event queued on the bus; returns how many were routed
    pub async fn process_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let event = match self.receiver.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Shell fell behind the event bus");
                    continue;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            };
            handled += 1;
            self.route(event).await;
        }
        handled
    }

    async fn route(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::RowAction {
                action: RowActionKind::Edit,
                data,
            } => self.edit(data),
            PanelEvent::RowAction {
                action: RowActionKind::Delete,
                data,
            } => {
                if let Err(e) = self.delete(&data).await {
                    debug!(id = data.id(), error = %e, "Delete from row action failed");
                }
            }
            PanelEvent::FormSuccess { mode, .. } => {
                debug!(%mode, "Form saved; returning to table");
                if let Err(e) = self.on_form_success().await {
                    warn!(error = %e, "Refresh after save failed");
                }
            }
            PanelEvent::FormCancel => self.on_form_cancel(),
            PanelEvent::RowAction {
                action: RowActionKind::View,
                ..
            }
            | PanelEvent::RowClick { .. } => {}
        }
    }

    fn endpoint(&self) -> Option<String> {
        self.table
            .config()
            .map(|c| c.api_endpoint.clone())
            .or_else(|| self.table_config.as_ref().map(|c| c.api_endpoint.clone()))
    }
}
