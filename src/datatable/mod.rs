// ABOUTME: Generic datatable engine driven entirely by a TableConfig descriptor
// ABOUTME: Fetches paged rows, filters and sorts client-side, paginates, and emits row events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

//! # Datatable Engine
//!
//! A [`DataTable`] is a cheap, cloneable handle. All clones share one state,
//! one in-flight request slot, and one debounce slot.
//!
//! ## Request discipline
//!
//! Every load bumps a generation counter and cancels the previous request's
//! token. A response is applied only if its generation is still current, so a
//! superseded request can never overwrite state set by a newer one, even if it
//! completes after being cancelled.

/// Supplementary client-side filtering
pub mod filter;

/// Cell rendering strategies
pub mod format;

/// List query construction
pub mod query;

/// Sort state and comparator
pub mod sort;

/// View model
pub mod view;

pub use format::{CellRenderer, RendererRegistry};
pub use sort::{SortDirection, SortState};
pub use view::{HeaderCell, PaginationView, RenderedRow, TableGrid, TableView};

use crate::client::{ApiRequest, ListResponse, RestTransport};
use crate::debounce::Debouncer;
use crate::errors::{AppError, AppResult};
use crate::events::{EventBus, PanelEvent, RowActionKind};
use crate::store::{AdminStore, StoreAction, SubscriptionId};
use admin_panel_core::constants::table::{EMPTY_STATE_MESSAGE, SEARCH_DEBOUNCE_MS};
use admin_panel_core::pagination::{self, PageRequest};
use admin_panel_core::schema::{Row, TableConfig};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of a load attempt that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Response applied to the table
    Loaded,
    /// Superseded by a newer request; state untouched
    Cancelled,
    /// Nothing to do (no config, or page out of range)
    Skipped,
}

#[derive(Default)]
struct TableState {
    config: Option<Arc<TableConfig>>,
    items: Vec<Row>,
    filtered: Vec<Row>,
    total_items: u64,
    current_page: u32,
    search_term: Option<String>,
    filters: BTreeMap<String, Value>,
    sort: Option<SortState>,
    loading: bool,
    generation: u64,
    in_flight: Option<CancellationToken>,
    subscription: Option<SubscriptionId>,
}

impl TableState {
    fn recompute(&mut self) {
        self.filtered = filter::apply_filters(&self.items, &self.filters);
        if let Some(sort) = &self.sort {
            sort::sort_rows(&mut self.filtered, sort);
        }
    }

    fn per_page(&self) -> u32 {
        self.config.as_ref().map_or(1, |c| c.items_per_page.max(1))
    }

    fn filtered_count(&self) -> u64 {
        let removed = (self.items.len() - self.filtered.len()) as u64;
        self.total_items
            .max(self.items.len() as u64)
            .saturating_sub(removed)
    }

    fn total_pages(&self) -> u64 {
        pagination::total_pages(self.filtered_count(), self.per_page())
    }

    fn visible_rows(&self) -> &[Row] {
        let per_page = self.per_page();
        // A backend that ignored `limit` sent more than a page; slice locally
        if self.items.len() > per_page as usize {
            let window = PageRequest::new(self.current_page, per_page).window(self.filtered.len());
            &self.filtered[window]
        } else {
            &self.filtered
        }
    }
}

struct TableInner {
    transport: Arc<dyn RestTransport>,
    events: EventBus,
    renderers: Arc<RendererRegistry>,
    store: Option<Arc<AdminStore>>,
    debouncer: Debouncer,
    state: Mutex<TableState>,
}

impl TableInner {
    fn lock(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for TableInner {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = state.in_flight.take() {
            token.cancel();
        }
        if let (Some(store), Some(id)) = (&self.store, state.subscription.take()) {
            store.unsubscribe(id);
        }
    }
}

/// Builder for [`DataTable`]
pub struct DataTableBuilder {
    transport: Arc<dyn RestTransport>,
    events: EventBus,
    renderers: Arc<RendererRegistry>,
    store: Option<Arc<AdminStore>>,
    debounce: Duration,
}

impl DataTableBuilder {
    /// Share an event bus with sibling components
    #[must_use]
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Use custom cell renderers
    #[must_use]
    pub fn renderers(mut self, renderers: Arc<RendererRegistry>) -> Self {
        self.renderers = renderers;
        self
    }

    /// Bind to a shared store
    #[must_use]
    pub fn store(mut self, store: Arc<AdminStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the search debounce period
    #[must_use]
    pub const fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Finish building an unconfigured table
    #[must_use]
    pub fn build(self) -> DataTable {
        DataTable {
            inner: Arc::new(TableInner {
                transport: self.transport,
                events: self.events,
                renderers: self.renderers,
                store: self.store,
                debouncer: Debouncer::new(self.debounce),
                state: Mutex::new(TableState {
                    current_page: 1,
                    ..TableState::default()
                }),
            }),
        }
    }
}

/// Paginated, filterable, sortable view over one REST collection
#[derive(Clone)]
pub struct DataTable {
    inner: Arc<TableInner>,
}

impl DataTable {
    /// Start building a table over `transport`
    #[must_use]
    pub fn builder(transport: Arc<dyn RestTransport>) -> DataTableBuilder {
        DataTableBuilder {
            transport,
            events: EventBus::new(),
            renderers: Arc::new(RendererRegistry::new()),
            store: None,
            debounce: Duration::from_millis(SEARCH_DEBOUNCE_MS),
        }
    }

    /// Event bus this table emits on
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Install a config, rebind the store subscription, and load the first page
    ///
    /// # Errors
    ///
    /// Returns an error if the initial load fails
    pub async fn set_config(&self, config: TableConfig) -> AppResult<LoadOutcome> {
        let config = Arc::new(config);
        {
            let mut state = self.inner.lock();
            if let Some(token) = state.in_flight.take() {
                token.cancel();
            }
            let subscription = state.subscription.take();
            // Bumped so a response still racing for the lock is discarded
            let generation = state.generation + 1;
            *state = TableState {
                config: Some(Arc::clone(&config)),
                current_page: 1,
                generation,
                ..TableState::default()
            };
            drop(state);

            if let Some(store) = &self.inner.store {
                if let Some(id) = subscription {
                    store.unsubscribe(id);
                }
                if let Some(key) = config.store_key.clone() {
                    let id = self.subscribe_to_store(store, key);
                    self.inner.lock().subscription = Some(id);
                }
            }
        }
        debug!(endpoint = %config.api_endpoint, "Datatable configured");
        self.load_data().await
    }

    /// Parse a JSON config attribute and install it.
    ///
    /// A parse failure is logged and leaves the current config in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the initial load fails
    pub async fn set_config_json(&self, json: &str) -> AppResult<LoadOutcome> {
        match serde_json::from_str::<TableConfig>(json) {
            Ok(config) => self.set_config(config).await,
            Err(e) => {
                warn!(error = %e, "Ignoring invalid datatable config attribute");
                Err(AppError::from(e))
            }
        }
    }

    fn subscribe_to_store(&self, store: &AdminStore, key: String) -> SubscriptionId {
        let weak: Weak<TableInner> = Arc::downgrade(&self.inner);
        store.subscribe(move |_, action| {
            let StoreAction::EntityChanged { entity } = action else {
                return;
            };
            if *entity != key {
                return;
            }
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let table = Self { inner };
            match Handle::try_current() {
                Ok(runtime) => {
                    runtime.spawn(async move {
                        if let Err(e) = table.refresh().await {
                            debug!(error = %e, "Store-triggered refresh failed");
                        }
                    });
                }
                Err(_) => warn!(entity = %key, "Store invalidation outside a runtime; table not refreshed"),
            }
        })
    }

    /// Reload the current page with the current search and filters
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; previous rows stay displayed
    pub async fn load_data(&self) -> AppResult<LoadOutcome> {
        self.perform_search(None).await
    }

    /// Fetch rows, optionally replacing the search term first.
    ///
    /// Cancels any request still in flight. A changed search term resets to page 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails for any reason other than cancellation
    pub async fn perform_search(&self, search: Option<String>) -> AppResult<LoadOutcome> {
        let (request, token, generation) = {
            let mut state = self.inner.lock();
            let Some(config) = state.config.clone() else {
                debug!("Datatable has no config; skipping load");
                return Ok(LoadOutcome::Skipped);
            };

            if let Some(term) = search {
                let term = Some(term.trim().to_owned()).filter(|t| !t.is_empty());
                if term != state.search_term {
                    state.current_page = 1;
                }
                state.search_term = term;
            }

            if let Some(previous) = state.in_flight.take() {
                debug!("Aborting superseded datatable request");
                previous.cancel();
            }
            let token = CancellationToken::new();
            state.in_flight = Some(token.clone());
            state.generation += 1;
            state.loading = true;

            let page = PageRequest::new(state.current_page, config.items_per_page);
            let params = query::build_query(page, state.search_term.as_deref(), &state.filters);
            (
                ApiRequest::get(config.api_endpoint.clone(), params),
                token,
                state.generation,
            )
        };

        let endpoint = request.path.clone();
        let result = tokio::select! {
            biased;
            () = token.cancelled() => return Ok(LoadOutcome::Cancelled),
            result = self.inner.transport.execute(request.clone()) => result,
        };

        let parsed = result
            .and_then(|response| response.error_for_status(&request))
            .and_then(|response| ListResponse::from_body(response.body));

        let published = {
            let mut state = self.inner.lock();
            if state.generation != generation {
                return Ok(LoadOutcome::Cancelled);
            }
            state.in_flight = None;
            state.loading = false;

            match parsed {
                Ok(list) => {
                    state.items = list.rows;
                    state.total_items = list.count;
                    state.recompute();
                    debug!(
                        endpoint = %endpoint,
                        rows = state.items.len(),
                        total = state.total_items,
                        "Datatable rows loaded"
                    );
                    state.config.as_ref().and_then(|c| c.store_key.clone()).map(|entity| {
                        StoreAction::ItemsLoaded {
                            entity,
                            rows: state.items.clone(),
                            total: state.total_items,
                        }
                    })
                }
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "Datatable fetch failed; keeping previous rows");
                    return Err(e);
                }
            }
        };

        if let (Some(store), Some(action)) = (&self.inner.store, published) {
            store.dispatch(action);
        }
        Ok(LoadOutcome::Loaded)
    }

    /// Search input handler: waits for the debounce period, then searches
    ///
    /// # Errors
    ///
    /// Returns an error when called outside a Tokio runtime
    pub fn on_search_input(&self, term: impl Into<String>) -> AppResult<()> {
        let table = self.clone();
        let term = term.into();
        self.inner.debouncer.schedule(async move {
            if let Err(e) = table.perform_search(Some(term)).await {
                debug!(error = %e, "Debounced search failed");
            }
        })
    }

    /// Filter control handler; applied immediately, not debounced
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails
    pub async fn on_filter_change(&self, key: impl Into<String>, value: Value) -> AppResult<LoadOutcome> {
        let key = key.into();
        let filters = {
            let mut state = self.inner.lock();
            if filter::is_active(&value) {
                state.filters.insert(key, value);
            } else {
                state.filters.remove(&key);
            }
            state.current_page = 1;
            state.recompute();
            state.filters.clone()
        };
        self.publish_filters(filters);
        self.load_data().await
    }

    /// Replace every active filter and reload from page 1
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails
    pub async fn set_filters(&self, filters: BTreeMap<String, Value>) -> AppResult<LoadOutcome> {
        let filters: BTreeMap<String, Value> =
            filters.into_iter().filter(|(_, v)| filter::is_active(v)).collect();
        {
            let mut state = self.inner.lock();
            state.filters.clone_from(&filters);
            state.current_page = 1;
            state.recompute();
        }
        self.publish_filters(filters);
        self.load_data().await
    }

    /// Drop every filter and the search term, then reload from page 1
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails
    pub async fn clear_filters(&self) -> AppResult<LoadOutcome> {
        self.inner.debouncer.cancel();
        {
            let mut state = self.inner.lock();
            state.filters.clear();
            state.search_term = None;
            state.current_page = 1;
            state.recompute();
        }
        self.publish_filters(BTreeMap::new());
        self.load_data().await
    }

    /// Re-run the supplementary filter pass over the loaded rows
    pub fn apply_client_side_filters(&self) {
        self.inner.lock().recompute();
    }

    fn publish_filters(&self, filters: BTreeMap<String, Value>) {
        let Some(store) = &self.inner.store else {
            return;
        };
        let key = self
            .inner
            .lock()
            .config
            .as_ref()
            .and_then(|c| c.store_key.clone());
        if let Some(entity) = key {
            store.dispatch(StoreAction::FiltersChanged { entity, filters });
        }
    }

    /// Header click: toggle direction on the same column, otherwise sort ascending
    pub fn handle_sort(&self, column: &str) -> SortState {
        let mut state = self.inner.lock();
        let next = SortState::after_click(state.sort.as_ref(), column);
        state.sort = Some(next.clone());
        state.recompute();
        next
    }

    /// Move to `page` if it is within `1..=total_pages`, then reload
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails
    pub async fn handle_page_change(&self, page: u32) -> AppResult<LoadOutcome> {
        {
            let mut state = self.inner.lock();
            let total_pages = state.total_pages();
            if page < 1 || u64::from(page) > total_pages {
                debug!(page, total_pages, "Ignoring out-of-range page change");
                return Ok(LoadOutcome::Skipped);
            }
            state.current_page = page;
        }
        self.load_data().await
    }

    /// Alias of [`Self::handle_page_change`] for host shells
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails
    pub async fn go_to_page(&self, page: u32) -> AppResult<LoadOutcome> {
        self.handle_page_change(page).await
    }

    /// Reload the current page
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails
    pub async fn refresh(&self) -> AppResult<LoadOutcome> {
        self.load_data().await
    }

    fn find_item(&self, id: i64) -> AppResult<Row> {
        self.inner
            .lock()
            .items
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Row {id}")).with_resource_id(id.to_string()))
    }

    /// Emit `RowClick` for a loaded row
    ///
    /// # Errors
    ///
    /// Returns an error if no loaded row has this id
    pub fn handle_row_click(&self, id: i64) -> AppResult<()> {
        let item = self.find_item(id)?;
        self.inner.events.emit(PanelEvent::RowClick { item, id });
        Ok(())
    }

    /// Emit `RowAction` for a loaded row
    ///
    /// # Errors
    ///
    /// Returns an error if no loaded row has this id
    pub fn handle_row_action(&self, action: RowActionKind, id: i64) -> AppResult<()> {
        let data = self.find_item(id)?;
        self.inner.events.emit(PanelEvent::RowAction { action, data });
        Ok(())
    }

    /// Derive the view model from current state
    #[must_use]
    pub fn render(&self) -> TableView {
        let state = self.inner.lock();
        let Some(config) = &state.config else {
            return TableView::Unconfigured;
        };

        let visible = state.visible_rows();
        if visible.is_empty() {
            return TableView::Empty {
                title: config.title.clone(),
                message: EMPTY_STATE_MESSAGE.to_owned(),
                loading: state.loading,
            };
        }

        let headers = config
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
                sortable: column.sortable,
                sort: state
                    .sort
                    .as_ref()
                    .filter(|sort| sort.column == column.key)
                    .map(|sort| sort.direction),
            })
            .collect();

        let rows = visible
            .iter()
            .map(|row| RenderedRow {
                id: row.id(),
                cells: config
                    .columns
                    .iter()
                    .map(|column| self.inner.renderers.render_cell(column, row))
                    .collect(),
            })
            .collect();

        TableView::Table(TableGrid {
            title: config.title.clone(),
            headers,
            rows,
            pagination: PaginationView {
                current_page: state.current_page,
                total_pages: state.total_pages(),
                total_items: state.filtered_count(),
                items_per_page: state.per_page(),
            },
            loading: state.loading,
        })
    }

    /// Installed config
    #[must_use]
    pub fn config(&self) -> Option<Arc<TableConfig>> {
        self.inner.lock().config.clone()
    }

    /// Rows of the last successful fetch
    #[must_use]
    pub fn items(&self) -> Vec<Row> {
        self.inner.lock().items.clone()
    }

    /// Loaded rows after the client-side filter pass, in display order
    #[must_use]
    pub fn filtered_items(&self) -> Vec<Row> {
        self.inner.lock().filtered.clone()
    }

    /// Rows on the current page
    #[must_use]
    pub fn visible_items(&self) -> Vec<Row> {
        self.inner.lock().visible_rows().to_vec()
    }

    /// Backend total of the last successful fetch
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.inner.lock().total_items
    }

    /// Backend total minus rows removed by the client-side pass
    #[must_use]
    pub fn filtered_count(&self) -> u64 {
        self.inner.lock().filtered_count()
    }

    /// `ceil(filtered_count / items_per_page)`
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.inner.lock().total_pages()
    }

    /// 1-based current page
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.inner.lock().current_page
    }

    /// Active search term
    #[must_use]
    pub fn search_term(&self) -> Option<String> {
        self.inner.lock().search_term.clone()
    }

    /// Active filters
    #[must_use]
    pub fn filters(&self) -> BTreeMap<String, Value> {
        self.inner.lock().filters.clone()
    }

    /// Active sort
    #[must_use]
    pub fn sort(&self) -> Option<SortState> {
        self.inner.lock().sort.clone()
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.lock().loading
    }
}
