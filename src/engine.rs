// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! View engine coordinator.
//!
//! The [`ListViewEngine`] is the facade that ties the components together:
//! the record store, the derivation pipeline with its memo cache, the
//! search debouncer, and the guarded asynchronous load operations.
//!
//! # Async coordination
//!
//! A single `watch`-backed loading flag serializes the two load operations:
//!
//! - [`refresh_data`](ListViewEngine::refresh_data) claims the flag; a
//!   concurrent caller that finds it claimed awaits the in-flight
//!   operation's completion instead of issuing a second fetch.
//! - [`load_more`](ListViewEngine::load_more) is dropped (not queued) while
//!   a load is in flight or the source is exhausted.
//!
//! The flag is cleared on every exit path, success or failure, and fetch
//! errors propagate to the caller after internal state is restored.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serde_json::{json, Value};
//! use view_engine::{ListViewEngine, RecordSource, SourceError, ViewConfig};
//!
//! struct VehicleApi;
//!
//! #[async_trait::async_trait]
//! impl RecordSource<Value> for VehicleApi {
//!     async fn fetch_all(&self) -> Result<Vec<Value>, SourceError> {
//!         Ok(vec![json!({"status": "active", "plate": "8B4 1234"})])
//!     }
//!
//!     async fn fetch_page(&self, _page: usize, _page_size: usize) -> Result<Vec<Value>, SourceError> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = ViewConfig {
//!     search_fields: vec!["plate".into()],
//!     ..Default::default()
//! };
//! let engine = ListViewEngine::new(config, Arc::new(VehicleApi)).unwrap();
//!
//! engine.refresh_data().await.expect("refresh failed");
//! engine.set_search_query("8b4");
//! let visible = engine.visible();
//! let stats = engine.stats();
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::{ConfigError, ViewConfig};
use crate::debounce::Debouncer;
use crate::metrics;
use crate::pipeline::{visible_len, FilterCriterion, ViewCache, ViewStats};
use crate::record::ViewRecord;
use crate::source::{RecordSource, SourceError};
use crate::store::RecordStore;

/// Error type for engine construction and load operations.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Rejected configuration at construction
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A fetch supplied by the caller's [`RecordSource`] failed
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Filter, search, and pagination inputs.
///
/// Shared with the debounce timer task, which commits the typed query into
/// `committed` once the quiet period elapses. Never locked across an await.
#[derive(Debug)]
struct QueryState {
    criterion: FilterCriterion,
    /// Latest typed search input, updated on every keystroke
    typed: String,
    /// Effective query the pipeline sees, updated only by debounce commit
    /// and by [`ListViewEngine::clear_filters`]
    committed: String,
    /// Pages revealed from the head of the derived sequence (1-based)
    page: usize,
}

impl QueryState {
    fn new() -> Self {
        Self {
            criterion: FilterCriterion::All,
            typed: String::new(),
            committed: String::new(),
            page: 1,
        }
    }
}

/// Debounced-search, filtered, paginated view over a growing collection.
///
/// One engine instance owns one view; instantiate one per entity context
/// (drivers, vehicles, contracts, ...) rather than sharing a process-wide
/// singleton.
pub struct ListViewEngine<T> {
    config: ViewConfig,
    source: Arc<dyn RecordSource<T>>,
    store: RwLock<RecordStore<T>>,
    query: Arc<Mutex<QueryState>>,
    cache: Mutex<ViewCache<T>>,
    loading: watch::Sender<bool>,
    debounce: Debouncer,
}

impl<T> ListViewEngine<T>
where
    T: ViewRecord + Clone,
{
    /// Create an engine with an empty initial collection.
    pub fn new(config: ViewConfig, source: Arc<dyn RecordSource<T>>) -> Result<Self, ViewError> {
        Self::with_initial_data(config, source, Vec::new())
    }

    /// Create an engine seeded with an initial collection.
    pub fn with_initial_data(
        config: ViewConfig,
        source: Arc<dyn RecordSource<T>>,
        initial: Vec<T>,
    ) -> Result<Self, ViewError> {
        config.validate()?;

        let (loading, _) = watch::channel(false);
        let store = RecordStore::new(initial, config.page_size);
        let debounce = Debouncer::new(Duration::from_millis(config.debounce_ms));

        debug!(
            page_size = config.page_size,
            debounce_ms = config.debounce_ms,
            seeded = store.len(),
            "view engine created"
        );

        Ok(Self {
            config,
            source,
            store: RwLock::new(store),
            query: Arc::new(Mutex::new(QueryState::new())),
            cache: Mutex::new(ViewCache::new()),
            loading,
            debounce,
        })
    }

    // =========================================================================
    // Synchronous mutations
    // =========================================================================

    /// Record a search keystroke.
    ///
    /// The typed value is visible immediately via
    /// [`search_query`](Self::search_query), but the pipeline only sees it
    /// after the quiet period elapses without another keystroke; the commit
    /// resets the page cursor to 1. Must be called from within a Tokio
    /// runtime.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.query.lock().typed = query.clone();

        let shared = Arc::clone(&self.query);
        self.debounce.schedule(move || {
            let mut q = shared.lock();
            if q.committed != query {
                debug!(query = %query, "search query committed");
                q.committed = query;
                q.page = 1;
                metrics::record_search_commit();
            }
        });
    }

    /// Select a filter criterion, effective immediately.
    pub fn set_selected_filter(&self, criterion: FilterCriterion) {
        debug!(criterion = criterion.as_str(), "filter selected");
        self.query.lock().criterion = criterion;
        metrics::record_filter_change();
    }

    /// Replace the collection wholesale, resetting the page cursor to 1.
    pub fn set_data(&self, records: Vec<T>) {
        let count = records.len();
        {
            let mut store = self.store.write();
            store.replace(records, self.config.page_size);
        }
        self.query.lock().page = 1;
        metrics::set_collection_items(count);
        debug!(count, "collection replaced");
    }

    /// Append records to the collection; the page cursor is untouched.
    pub fn add_data(&self, records: Vec<T>) {
        let appended = records.len();
        let total = {
            let mut store = self.store.write();
            store.append(records, self.config.page_size);
            store.len()
        };
        metrics::set_collection_items(total);
        debug!(appended, total, "collection appended");
    }

    /// Reset search to empty, filter to "all", and the page cursor to 1.
    ///
    /// Synchronous: any pending debounce commit is cancelled so it cannot
    /// fire afterwards and override the reset.
    pub fn clear_filters(&self) {
        self.debounce.cancel();
        let mut q = self.query.lock();
        q.typed.clear();
        q.committed.clear();
        q.criterion = FilterCriterion::All;
        q.page = 1;
        debug!("filters cleared");
    }

    // =========================================================================
    // Asynchronous loads
    // =========================================================================

    /// Reload the collection from the source.
    ///
    /// While the fetch is in flight `loading` is true. On settle, success
    /// or failure, the flag is cleared and the page cursor resets to 1; a
    /// successful fetch replaces the collection per the replace heuristic.
    ///
    /// A caller invoking this while another load is in flight does not
    /// issue a second fetch; it awaits the in-flight operation's completion
    /// and returns `Ok(())`.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_data(&self) -> Result<(), ViewError> {
        if !self.claim_loading() {
            debug!("refresh joined an in-flight load");
            metrics::record_load("refresh", "coalesced");
            self.wait_for_settle().await;
            return Ok(());
        }

        debug!("refresh started");
        let result = self.source.fetch_all().await;
        match result {
            Ok(records) => {
                let count = records.len();
                self.store.write().replace(records, self.config.page_size);
                self.query.lock().page = 1;
                self.release_loading();
                metrics::record_load("refresh", "success");
                metrics::set_collection_items(count);
                debug!(count, "refresh complete");
                Ok(())
            }
            Err(e) => {
                self.query.lock().page = 1;
                self.release_loading();
                metrics::record_load("refresh", "error");
                warn!(error = %e, "refresh failed");
                Err(e.into())
            }
        }
    }

    /// Fetch and append the next page from the source.
    ///
    /// Returns `Ok(false)` without fetching when a load is already in
    /// flight or the source is exhausted; such calls are dropped, never
    /// queued. On a successful fetch the delivery is appended per the
    /// append heuristic and the page cursor advances by 1; on failure the
    /// cursor is untouched. The loading flag is cleared on every exit path.
    #[tracing::instrument(skip(self))]
    pub async fn load_more(&self) -> Result<bool, ViewError> {
        if !self.has_more() {
            metrics::record_load("load_more", "dropped");
            return Ok(false);
        }
        if !self.claim_loading() {
            debug!("load_more dropped, another load in flight");
            metrics::record_load("load_more", "dropped");
            return Ok(false);
        }
        // Exhaustion may have been signalled between the check and the
        // claim; re-check now that the flag is ours.
        if !self.store.read().has_more() {
            self.release_loading();
            metrics::record_load("load_more", "dropped");
            return Ok(false);
        }

        let next_page = self.query.lock().page + 1;
        debug!(page = next_page, "load_more started");
        let result = self.source.fetch_page(next_page, self.config.page_size).await;
        match result {
            Ok(records) => {
                let appended = records.len();
                let total = {
                    let mut store = self.store.write();
                    store.append(records, self.config.page_size);
                    store.len()
                };
                self.query.lock().page = next_page;
                self.release_loading();
                metrics::record_load("load_more", "success");
                metrics::set_collection_items(total);
                debug!(appended, total, page = next_page, "load_more complete");
                Ok(true)
            }
            Err(e) => {
                self.release_loading();
                metrics::record_load("load_more", "error");
                warn!(error = %e, "load_more failed");
                Err(e.into())
            }
        }
    }

    /// Atomically claim the loading flag; false if already claimed.
    fn claim_loading(&self) -> bool {
        self.loading.send_if_modified(|loading| {
            if *loading {
                false
            } else {
                *loading = true;
                true
            }
        })
    }

    fn release_loading(&self) {
        self.loading.send_replace(false);
    }

    /// Await the in-flight load's completion.
    async fn wait_for_settle(&self) {
        let mut rx = self.loading.subscribe();
        while *rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                break;
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The full collection, in insertion order.
    #[must_use]
    pub fn data(&self) -> Vec<T> {
        self.store.read().records().to_vec()
    }

    /// The current visible page prefix: the first
    /// `current_page * page_size` rows of the filtered + searched sequence.
    #[must_use]
    pub fn visible(&self) -> Vec<T> {
        let store = self.store.read();
        let q = self.query.lock();
        let mut cache = self.cache.lock();
        let rows = cache.rows(
            store.records(),
            store.revision(),
            &q.criterion,
            &q.committed,
            &self.config.search_fields,
        );
        metrics::set_derived_rows(rows.len());
        let limit = visible_len(rows.len(), q.page, self.config.page_size);
        rows[..limit].to_vec()
    }

    /// Summary counts, consistent with the latest pipeline output.
    #[must_use]
    pub fn stats(&self) -> ViewStats {
        let store = self.store.read();
        let q = self.query.lock();
        let mut cache = self.cache.lock();
        let rows = cache.rows(
            store.records(),
            store.revision(),
            &q.criterion,
            &q.committed,
            &self.config.search_fields,
        );
        ViewStats {
            total: store.len(),
            filtered: rows.len(),
            showing: visible_len(rows.len(), q.page, self.config.page_size),
        }
    }

    /// Latest typed search input (not yet necessarily committed).
    #[must_use]
    pub fn search_query(&self) -> String {
        self.query.lock().typed.clone()
    }

    /// The effective (debounced) query the pipeline currently applies.
    #[must_use]
    pub fn committed_query(&self) -> String {
        self.query.lock().committed.clone()
    }

    /// Currently selected filter criterion.
    #[must_use]
    pub fn selected_filter(&self) -> FilterCriterion {
        self.query.lock().criterion.clone()
    }

    /// Whether a refresh or load-more is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Subscribe to loading-flag changes.
    pub fn loading_receiver(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Whether the upstream source is believed to hold more records.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.store.read().has_more()
    }

    /// Pages revealed so far (1-based prefix count).
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.query.lock().page
    }

    /// Number of records in the full collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }
}
