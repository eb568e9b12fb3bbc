// ABOUTME: Mutating commands: create and update through the form, delete through the shell
// ABOUTME: Validation errors are printed per field and nothing is sent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use crate::helpers::prompt::{StderrNotifier, StdinConfirm};
use admin_panel::client::RestTransport;
use admin_panel::entities::{self, EntityKind};
use admin_panel::errors::{AppError, AppResult};
use admin_panel::events::{EventBus, FormMode};
use admin_panel::forms::{FormEngine, SubmitOutcome};
use admin_panel::shell::{DeleteOutcome, EntityShell};
use admin_panel_core::schema::Row;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

fn entity_form(transport: Arc<dyn RestTransport>, entity: EntityKind) -> FormEngine {
    let mut form = FormEngine::new(transport, EventBus::new())
        .with_validators(Arc::new(entities::validators()));
    form.set_config(entity.definition().form.clone());
    form
}

async fn submit(
    mut form: FormEngine,
    fields: &[(String, String)],
    tab: Option<&str>,
) -> AppResult<()> {
    if let Some(tab) = tab {
        form.switch_tab(tab)?;
    }
    for (id, value) in fields {
        form.set_value(id, value.clone())?;
    }

    match form.handle_submit().await? {
        SubmitOutcome::Saved(body) => {
            if let Some((_, message)) = form.message() {
                println!("{message}");
            }
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        SubmitOutcome::Invalid => {
            for (field, error) in form.errors() {
                eprintln!("  {field}: {error}");
            }
            Err(AppError::invalid_input(format!(
                "{} field(s) failed validation",
                form.errors().len()
            )))
        }
    }
}

/// POST a new row built from `fields`
pub async fn create(
    transport: Arc<dyn RestTransport>,
    entity: EntityKind,
    fields: &[(String, String)],
    tab: Option<&str>,
) -> AppResult<()> {
    let form = entity_form(transport, entity);
    submit(form, fields, tab).await
}

/// PUT row `id` with `fields`
pub async fn update(
    transport: Arc<dyn RestTransport>,
    entity: EntityKind,
    id: i64,
    fields: &[(String, String)],
    tab: Option<&str>,
) -> AppResult<()> {
    let mut form = entity_form(transport, entity);
    form.set_mode(FormMode::Edit);
    form.set_data(Row::from_value(json!({ "id": id }))?);
    submit(form, fields, tab).await
}

/// DELETE row `id` after confirmation
pub async fn delete(
    transport: Arc<dyn RestTransport>,
    entity: EntityKind,
    id: i64,
    assume_yes: bool,
) -> AppResult<()> {
    let mut shell = EntityShell::for_entity(
        transport,
        entity.definition(),
        Arc::new(StdinConfirm { assume_yes }),
    )
    .notifier(Arc::new(StderrNotifier))
    .build();
    shell.mount().await?;

    let row = Row::from_value(json!({ "id": id }))?;
    match shell.delete(&row).await? {
        DeleteOutcome::Deleted => {
            info!(entity = %entity, id, "Deleted");
            println!("Deleted {entity} {id}");
        }
        DeleteOutcome::Declined => println!("Cancelled"),
    }
    Ok(())
}
