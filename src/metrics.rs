// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for view-engine.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The embedding application is responsible for choosing the exporter
//! (Prometheus, OTEL, etc.)
//!
//! # Metric Naming Convention
//! - `view_engine_` prefix for all metrics
//! - `_total` suffix for counters
//!
//! # Labels
//! - `operation`: refresh, load_more
//! - `status`: success, error, coalesced, dropped

use metrics::{counter, gauge};

/// Record the outcome of an asynchronous load operation
pub fn record_load(operation: &str, status: &str) {
    counter!(
        "view_engine_loads_total",
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a committed (debounced) search query change
pub fn record_search_commit() {
    counter!("view_engine_search_commits_total").increment(1);
}

/// Record a filter criterion change
pub fn record_filter_change() {
    counter!("view_engine_filter_changes_total").increment(1);
}

/// Set current collection size
pub fn set_collection_items(count: usize) {
    gauge!("view_engine_collection_items").set(count as f64);
}

/// Set number of rows surviving filter + search
pub fn set_derived_rows(count: usize) {
    gauge!("view_engine_derived_rows").set(count as f64);
}
