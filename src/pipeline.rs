// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! View derivation pipeline: filter, then search, then paginate.
//!
//! The pipeline turns the raw collection into the rows a caller renders.
//! Stages run in a fixed order:
//!
//! 1. **Filter** — drop records whose categorical key does not equal the
//!    selected criterion (records without a key always pass).
//! 2. **Search** — drop records where no declared field contains the
//!    committed query as a case-insensitive substring.
//! 3. **Paginate** — reveal the first `page * page_size` rows. The page
//!    cursor is a prefix length, not an offset, so advancing pages grows
//!    the visible slice rather than replacing it.
//!
//! Filter and search are pure functions of their inputs; [`ViewCache`]
//! memoizes their combined result keyed on (collection revision, criterion,
//! query) so the derivation reruns only when one of those actually changes.
//!
//! # Flow
//!
//! ```text
//! Read arrives (visible rows / stats)
//!       │
//!       ▼
//! ┌───────────────────────────────────┐
//! │  Cache lookup                     │
//! │  key = (revision, filter, query)  │
//! └───────────────────────────────────┘
//!       │
//!       ├─→ Hit → slice cached rows to page prefix
//!       │
//!       └─→ Miss → filter + search, cache rows, slice
//! ```

use tracing::debug;

use crate::record::ViewRecord;

/// Categorical filter selection. `All` is the unfiltered sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCriterion {
    /// Pass every record.
    All,
    /// Keep records whose filter key equals the value (or who have no key).
    Value(String),
}

impl FilterCriterion {
    /// Parse a raw selection, mapping the `"all"` sentinel to [`Self::All`].
    #[must_use]
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == "all" {
            Self::All
        } else {
            Self::Value(value)
        }
    }

    /// The raw selection string, `"all"` for the unfiltered sentinel.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Value(v) => v,
        }
    }

    /// Check if this is the unfiltered sentinel.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl Default for FilterCriterion {
    fn default() -> Self {
        Self::All
    }
}

/// Summary counts for the current view, always consistent with the latest
/// pipeline output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewStats {
    /// Records in the full collection
    pub total: usize,
    /// Records surviving filter + search
    pub filtered: usize,
    /// Records in the visible page prefix
    pub showing: usize,
}

/// Whether a record survives the filter stage.
pub(crate) fn passes_filter<T: ViewRecord>(record: &T, criterion: &FilterCriterion) -> bool {
    match criterion {
        FilterCriterion::All => true,
        FilterCriterion::Value(v) => record.filter_key().map_or(true, |key| key == v),
    }
}

/// Whether a record survives the search stage.
///
/// `needle_lower` must already be trimmed and lowercased; an empty needle
/// means the search stage is a pass-through and this is not called.
pub(crate) fn matches_search<T: ViewRecord>(
    record: &T,
    fields: &[String],
    needle_lower: &str,
) -> bool {
    fields
        .iter()
        .any(|field| {
            record
                .search_field(field)
                .is_some_and(|value| value.contains(needle_lower))
        })
}

/// Run filter + search over the collection, producing the derived sequence.
pub fn derive_rows<T>(
    records: &[T],
    criterion: &FilterCriterion,
    query: &str,
    fields: &[String],
) -> Vec<T>
where
    T: ViewRecord + Clone,
{
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|r| passes_filter(*r, criterion))
        .filter(|r| needle.is_empty() || matches_search(*r, fields, &needle))
        .cloned()
        .collect()
}

/// Cache key for a derived sequence.
///
/// The query is stored trimmed and lowercased so cosmetic whitespace
/// differences don't force a recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewKey {
    revision: u64,
    criterion: FilterCriterion,
    query: String,
}

/// Memoized filter + search result with revision-based invalidation.
///
/// Any collection mutation bumps the store revision, which changes the key
/// and invalidates the cached rows automatically. Pagination is a cheap
/// slice of the cached sequence, so the page cursor is deliberately not
/// part of the key.
#[derive(Debug)]
pub struct ViewCache<T> {
    entry: Option<(ViewKey, Vec<T>)>,
    hits: u64,
    misses: u64,
}

impl<T> ViewCache<T>
where
    T: ViewRecord + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            entry: None,
            hits: 0,
            misses: 0,
        }
    }

    /// The derived (filtered + searched) sequence for the given inputs,
    /// recomputed only when an input changed since the last call.
    pub fn rows(
        &mut self,
        records: &[T],
        revision: u64,
        criterion: &FilterCriterion,
        query: &str,
        fields: &[String],
    ) -> &[T] {
        let key = ViewKey {
            revision,
            criterion: criterion.clone(),
            query: query.trim().to_lowercase(),
        };

        let stale = self.entry.as_ref().map_or(true, |(k, _)| *k != key);
        if stale {
            self.misses += 1;
            let rows = derive_rows(records, criterion, query, fields);
            debug!(
                revision,
                criterion = criterion.as_str(),
                derived = rows.len(),
                from = records.len(),
                "view derivation recomputed"
            );
            self.entry = Some((key, rows));
        } else {
            self.hits += 1;
        }

        match &self.entry {
            Some((_, rows)) => rows,
            None => &[],
        }
    }

    /// Number of reads served from the memoized sequence.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of reads that forced a recompute.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl<T> Default for ViewCache<T>
where
    T: ViewRecord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Length of the visible prefix for a page cursor.
#[must_use]
pub fn visible_len(derived_len: usize, page: usize, page_size: usize) -> usize {
    page.saturating_mul(page_size).min(derived_len)
}
