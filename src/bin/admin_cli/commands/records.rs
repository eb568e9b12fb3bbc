// ABOUTME: Read-only commands: one table page and a rendered form
// ABOUTME: Drive the engines exactly as an interactive host would, then print the view model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use admin_panel::client::RestTransport;
use admin_panel::config::PanelConfig;
use admin_panel::datatable::{DataTable, SortDirection};
use admin_panel::entities::{self, EntityKind};
use admin_panel::errors::{AppError, AppResult};
use admin_panel::events::{EventBus, FormMode};
use admin_panel::forms::FormEngine;
use admin_panel_core::schema::Row;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

pub struct ListOptions {
    pub page: u32,
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
    pub sort: Option<String>,
    pub desc: bool,
    pub limit: Option<u32>,
    pub json: bool,
}

/// Print one page of an entity's table
pub async fn list(
    transport: Arc<dyn RestTransport>,
    config: &PanelConfig,
    entity: EntityKind,
    options: ListOptions,
) -> AppResult<()> {
    let mut table_config = entity.definition().table.clone();
    table_config.items_per_page = options.limit.unwrap_or(config.default_page_size);

    let table = DataTable::builder(transport)
        .renderers(Arc::new(entities::renderers()))
        .debounce(config.search_debounce)
        .build();
    table.set_config(table_config).await?;

    if !options.filters.is_empty() {
        let filters: BTreeMap<String, Value> = options
            .filters
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        table.set_filters(filters).await?;
    }
    if let Some(search) = options.search {
        table.perform_search(Some(search)).await?;
    }
    if options.page > 1 {
        table.go_to_page(options.page).await?;
    }
    if let Some(column) = options.sort.as_deref() {
        let state = table.handle_sort(column);
        if options.desc && state.direction == SortDirection::Asc {
            table.handle_sort(column);
        }
    }

    info!(
        entity = %entity,
        page = table.current_page(),
        total = table.total_items(),
        "Listed rows"
    );

    if options.json {
        let rows: Vec<Value> = table.visible_items().into_iter().map(Row::into_value).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{}", table.render());
    }
    Ok(())
}

/// Print an entity's form, optionally prefilled
pub fn form(
    transport: Arc<dyn RestTransport>,
    entity: EntityKind,
    tab: Option<&str>,
    data: Option<&str>,
) -> AppResult<()> {
    let mut form = FormEngine::new(transport, EventBus::new())
        .with_validators(Arc::new(entities::validators()));
    form.set_config(entity.definition().form.clone());

    if let Some(json) = data {
        form.set_data_json(json)?;
        form.set_mode(FormMode::Edit);
    }
    if let Some(tab) = tab {
        form.switch_tab(tab)?;
    }

    let view = form
        .render()
        .ok_or_else(|| AppError::internal("Form rendered without a config"))?;
    println!("{view}");
    Ok(())
}
