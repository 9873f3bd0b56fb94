// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Upstream record source trait.
//!
//! The engine contains no I/O of its own. Callers supply the fetch logic
//! behind refresh and load-more by implementing [`RecordSource`], typically
//! against a REST endpoint or an ORM query.

use async_trait::async_trait;
use thiserror::Error;

/// Error returned by [`RecordSource`] implementations.
///
/// The engine never interprets these; it restores its own state and hands
/// the error back to the caller for handling at the UI boundary.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The underlying fetch failed (network, backend, decoding).
    #[error("fetch failed: {0}")]
    Fetch(String),
    /// Local I/O failed.
    #[error("source I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Async supplier of records for a view.
///
/// `fetch_all` backs [`refresh_data`](crate::ListViewEngine::refresh_data)
/// and should return the full fresh collection. `fetch_page` backs
/// [`load_more`](crate::ListViewEngine::load_more) and should return page
/// `page` (1-based) sized `page_size`; the exhaustion heuristics assume
/// pages are fetched at exactly `page_size`, so a short page is read as
/// "no more data".
#[async_trait]
pub trait RecordSource<T>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<T>, SourceError>;

    async fn fetch_page(&self, page: usize, page_size: usize) -> Result<Vec<T>, SourceError>;
}
