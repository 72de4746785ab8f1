//! Table state controller
//!
//! Owns the canonical table state (page, page size, sort, search,
//! filters) and refetches through a [`PageFetcher`] whenever an action
//! changes what should be displayed. Overlapping fetches resolve
//! last-request-wins: a response is applied only when no newer request
//! has been issued since, so a slow stale response can never overwrite
//! the state of a newer action.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{Pagination, SortDirection, TableQuery};
use tokio::sync::{RwLock, watch};

use crate::config::TableConfig;
use crate::error::ClientResult;
use crate::fetch::{HttpFetcher, PageFetcher};

/// Active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// Column key sent as `sort_by`
    pub key: String,
    /// Direction sent as `sort_direction`
    pub direction: SortDirection,
}

/// Snapshot of the table state handed to consumers
///
/// Rows are opaque to the controller; `T` is any deserializable type,
/// `serde_json::Value` by default.
#[derive(Debug, Clone)]
pub struct TableState<T = Value> {
    /// Rows of the last successful fetch
    pub items: Vec<T>,
    /// Pagination metadata of the last successful fetch
    pub pagination: Option<Pagination>,
    /// Whether a fetch is in flight
    pub loading: bool,
    /// Message of the last failed fetch
    pub error: Option<String>,
    /// Free-text search keyword
    pub search: String,
    /// Active sort, if any
    pub sort: Option<Sort>,
    /// Requested page (1-based)
    pub current_page: u32,
    /// Requested page size
    pub per_page: u32,
    /// Active filter parameters
    pub filters: BTreeMap<String, Value>,
}

impl<T> TableState<T> {
    fn new(config: &TableConfig) -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
            loading: false,
            error: None,
            search: String::new(),
            sort: None,
            current_page: 1,
            per_page: config.initial_per_page,
            filters: config.initial_filters.clone(),
        }
    }

    /// Request parameters for the current state.
    fn query(&self) -> TableQuery {
        TableQuery {
            page: self.current_page,
            per_page: self.per_page,
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            sort_by: self.sort.as_ref().map(|sort| sort.key.clone()),
            sort_direction: self
                .sort
                .as_ref()
                .map(|sort| sort.direction)
                .unwrap_or_default(),
            filters: self.filters.clone(),
        }
    }
}

/// Paginated data-table controller
///
/// A cloneable handle over shared state. All mutation goes through the
/// action methods; consumers read cloned snapshots via [`DataTable::state`]
/// and can watch for transitions via [`DataTable::subscribe`]. Fetch
/// failures never escape an action: they are captured into
/// [`TableState::error`] and the table stays usable.
pub struct DataTable<T = Value, F = HttpFetcher> {
    fetcher: Arc<F>,
    config: Arc<TableConfig>,
    state: Arc<RwLock<TableState<T>>>,
    seq: Arc<AtomicU64>,
    revision: Arc<watch::Sender<u64>>,
}

impl<T, F> Clone for DataTable<T, F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
            seq: Arc::clone(&self.seq),
            revision: Arc::clone(&self.revision),
        }
    }
}

impl<T> DataTable<T, HttpFetcher>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a table bound to `config.api_url` with a network fetcher.
    ///
    /// Performs (and awaits) the initial fetch unless `auto_load` was
    /// disabled.
    pub async fn new(config: TableConfig) -> ClientResult<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher).await)
    }
}

impl<T, F> DataTable<T, F>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    F: PageFetcher,
{
    /// Create a table driven by a custom fetcher.
    pub async fn with_fetcher(config: TableConfig, fetcher: F) -> Self {
        let (revision, _) = watch::channel(0);
        let table = Self {
            fetcher: Arc::new(fetcher),
            state: Arc::new(RwLock::new(TableState::new(&config))),
            config: Arc::new(config),
            seq: Arc::new(AtomicU64::new(0)),
            revision: Arc::new(revision),
        };
        if table.config.auto_load {
            table.reload().await;
        }
        table
    }

    /// Cloned snapshot of the current state.
    pub async fn state(&self) -> TableState<T> {
        self.state.read().await.clone()
    }

    /// Table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Watch for state changes.
    ///
    /// The receiver yields a revision counter bumped after every applied
    /// state transition; read the new state with [`DataTable::state`].
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Set the search keyword and reload from the first page.
    pub async fn set_search(&self, search: impl Into<String> + Send) {
        {
            let mut state = self.state.write().await;
            state.search = search.into();
            state.current_page = 1;
        }
        self.reload().await;
    }

    /// Sort by `key` and reload from the first page.
    ///
    /// Without an explicit direction, sorting on the already-active key
    /// toggles between ascending and descending; any other call sorts
    /// ascending unless `direction` says otherwise.
    pub async fn set_sort(&self, key: impl Into<String> + Send, direction: Option<SortDirection>) {
        let key = key.into();
        {
            let mut state = self.state.write().await;
            state.sort = match (state.sort.take(), direction) {
                (Some(sort), None) if sort.key == key => Some(Sort {
                    direction: sort.direction.toggled(),
                    key,
                }),
                (_, direction) => Some(Sort {
                    key,
                    direction: direction.unwrap_or(SortDirection::Asc),
                }),
            };
            state.current_page = 1;
        }
        self.reload().await;
    }

    /// Move to `page`.
    ///
    /// Out-of-range or unchanged page numbers are ignored; no request is
    /// issued for a no-op.
    pub async fn set_page(&self, page: u32) {
        {
            let mut state = self.state.write().await;
            if page < 1 || page == state.current_page {
                return;
            }
            if let Some(pagination) = &state.pagination
                && page > pagination.last_page
            {
                return;
            }
            state.current_page = page;
        }
        self.reload().await;
    }

    /// Change the page size and reload from the first page.
    pub async fn set_per_page(&self, per_page: u32) {
        {
            let mut state = self.state.write().await;
            state.per_page = per_page;
            state.current_page = 1;
        }
        self.reload().await;
    }

    /// Replace the filter parameters wholesale and reload from the first page.
    pub async fn set_filters(&self, filters: BTreeMap<String, Value>) {
        {
            let mut state = self.state.write().await;
            state.filters = filters;
            state.current_page = 1;
        }
        self.reload().await;
    }

    /// Refetch the current page with unchanged parameters.
    pub async fn refresh(&self) {
        self.reload().await;
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Issue a fetch for the current state and apply its result unless a
    /// newer request supersedes it first.
    async fn reload(&self) {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let query = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            state.query()
        };
        self.notify();

        tracing::debug!(
            page = query.page,
            per_page = query.per_page,
            "loading table page"
        );
        let result = self
            .fetcher
            .fetch_page::<T>(&self.config.api_url, &query)
            .await;

        let mut state = self.state.write().await;
        if self.seq.load(Ordering::SeqCst) != ticket {
            // A newer request owns the state now.
            tracing::debug!(ticket, "discarding superseded response");
            return;
        }
        match result {
            Ok(page) => {
                state.items = page.items;
                state.pagination = Some(page.pagination);
                state.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "table fetch failed");
                state.items = Vec::new();
                state.pagination = None;
                state.error = Some(err.to_string());
            }
        }
        state.loading = false;
        drop(state);
        self.notify();
    }
}
