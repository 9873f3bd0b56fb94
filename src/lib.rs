//! # View Engine
//!
//! A generic, incrementally-loadable list view engine for growing record
//! collections: debounced free-text search, categorical filtering, and
//! prefix pagination over an in-memory collection, with guarded
//! asynchronous refresh and load-more operations.
//!
//! ## Architecture
//!
//! The engine derives a read-side projection from an authoritative
//! in-memory collection:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Caller / UI Layer                       │
//! │  • Renders visible rows, invokes operations                 │
//! │  • Supplies fetch logic via RecordSource                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Async Coordinator (engine)                 │
//! │  • Single loading flag guards refresh / load-more           │
//! │  • Debounced search commits (quiet-period coalescing)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  View Pipeline (pipeline)                   │
//! │  • Filter → search → paginate, in fixed order               │
//! │  • Memoized on (revision, criterion, query)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Collection Store (store)                   │
//! │  • Ordered records, replace / append                        │
//! │  • has_more heuristics, revision counter                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serde_json::{json, Value};
//! use view_engine::{ListViewEngine, RecordSource, SourceError, ViewConfig};
//!
//! struct DriversApi;
//!
//! #[async_trait::async_trait]
//! impl RecordSource<Value> for DriversApi {
//!     async fn fetch_all(&self) -> Result<Vec<Value>, SourceError> {
//!         // GET /drivers
//!         Ok(vec![json!({"status": "active", "name": "Jana Novak"})])
//!     }
//!
//!     async fn fetch_page(&self, page: usize, page_size: usize) -> Result<Vec<Value>, SourceError> {
//!         // GET /drivers?page={page}&size={page_size}
//!         Ok(Vec::new())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ViewConfig {
//!         page_size: 20,
//!         search_fields: vec!["name".into()],
//!         ..Default::default()
//!     };
//!     let engine = ListViewEngine::new(config, Arc::new(DriversApi))
//!         .expect("invalid config");
//!
//!     engine.refresh_data().await.expect("refresh failed");
//!     engine.set_search_query("nov");
//!
//!     for row in engine.visible() {
//!         println!("{row}");
//!     }
//!     let stats = engine.stats();
//!     println!("{} of {} shown", stats.showing, stats.total);
//! }
//! ```
//!
//! ## Behavior Notes
//!
//! - **Search** commits only after a quiet period (default 300ms); rapid
//!   keystrokes coalesce so the pipeline reruns once, not per keystroke.
//!   A commit resets the page cursor to 1.
//! - **Pagination** reveals a growing prefix: page 2 shows the first two
//!   pages, it never replaces page 1.
//! - **has_more** is heuristic: a replace larger than one page, or an
//!   append of exactly one page, reads as "more available". It relies on
//!   the caller fetching pages sized exactly `page_size`.
//! - **One load at a time**: concurrent `refresh_data` calls share one
//!   fetch; `load_more` while loading or exhausted is dropped.
//! - One engine instance per entity context; the engine is not a
//!   process-wide singleton.
//!
//! ## Modules
//!
//! - [`engine`]: The [`ListViewEngine`] coordinator
//! - [`pipeline`]: Filter/search/paginate derivation with memoization
//! - [`store`]: The in-memory collection and exhaustion heuristics
//! - [`record`]: The [`ViewRecord`] access trait and scalar coercion
//! - [`debounce`]: Quiet-period coalescing for search input
//! - [`source`]: The [`RecordSource`] trait callers implement
//! - [`config`]: Engine configuration
//! - [`metrics`]: Metrics instrumentation helpers

pub mod config;
pub mod debounce;
pub mod engine;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod source;
pub mod store;

pub use config::{ConfigError, FilterOption, ViewConfig};
pub use engine::{ListViewEngine, ViewError};
pub use pipeline::{derive_rows, FilterCriterion, ViewCache, ViewStats};
pub use record::{FieldValue, ViewRecord};
pub use source::{RecordSource, SourceError};
pub use store::RecordStore;
