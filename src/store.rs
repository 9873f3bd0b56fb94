// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! In-memory record collection with exhaustion heuristics.
//!
//! The [`RecordStore`] holds the authoritative ordered sequence of records
//! behind a view. It supports exactly two mutations, wholesale replacement
//! and incremental append, and derives the `has_more` flag from the size of
//! each delivery:
//!
//! - **replace**: `has_more = delivery.len() > page_size` — a delivery
//!   larger than one page suggests the upstream source holds more.
//! - **append**: `has_more = delivery.len() == page_size` — a full page
//!   suggests more remain; a short page signals exhaustion.
//!
//! Both heuristics assume the caller fetches pages sized exactly
//! `page_size`; they are approximations, not guarantees.
//!
//! Every mutation bumps a revision counter. Downstream caches key their
//! memoized results on the revision so a stale snapshot can never be
//! observed.

/// Ordered record collection plus the derived exhaustion flag.
///
/// Insertion order is preserved and duplicates are permitted; the store
/// never deduplicates.
#[derive(Debug)]
pub struct RecordStore<T> {
    records: Vec<T>,
    has_more: bool,
    revision: u64,
}

impl<T> RecordStore<T> {
    /// Create a store seeded with an initial collection.
    ///
    /// The initial delivery is treated like a replace: `has_more` is set
    /// when it exceeds one page.
    #[must_use]
    pub fn new(initial: Vec<T>, page_size: usize) -> Self {
        let has_more = initial.len() > page_size;
        Self {
            records: initial,
            has_more,
            revision: 0,
        }
    }

    /// Replace the entire collection with a fresh delivery.
    pub fn replace(&mut self, new_records: Vec<T>, page_size: usize) {
        self.has_more = new_records.len() > page_size;
        self.records = new_records;
        self.revision += 1;
    }

    /// Append a delivery to the end of the collection, preserving order.
    pub fn append(&mut self, new_records: Vec<T>, page_size: usize) {
        self.has_more = new_records.len() == page_size;
        self.records.extend(new_records);
        self.revision += 1;
    }

    /// The full collection, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the upstream source is believed to hold more records.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Monotonically increasing mutation counter, used as a cache key.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_more_only_past_one_page() {
        let store: RecordStore<u32> = RecordStore::new((0..20).collect(), 20);
        assert!(!store.has_more());

        let store: RecordStore<u32> = RecordStore::new((0..21).collect(), 20);
        assert!(store.has_more());
    }

    #[test]
    fn test_replace_boundary_semantics() {
        let mut store: RecordStore<u32> = RecordStore::new(Vec::new(), 20);

        // Exactly one page: no reason to believe more exist.
        store.replace((0..20).collect(), 20);
        assert_eq!(store.len(), 20);
        assert!(!store.has_more());

        // One past a page: the source likely has more.
        store.replace((0..21).collect(), 20);
        assert_eq!(store.len(), 21);
        assert!(store.has_more());
    }

    #[test]
    fn test_append_boundary_semantics() {
        let mut store: RecordStore<u32> = RecordStore::new(Vec::new(), 20);

        // A full page suggests more remain.
        store.append((0..20).collect(), 20);
        assert!(store.has_more());

        // 21 items is not a full page; the heuristic reads it as exhaustion.
        // Deliberately asymmetric with replace, which treats 21 as "more".
        store.append((0..21).collect(), 20);
        assert!(!store.has_more());

        // A short page signals exhaustion.
        store.append((0..5).collect(), 20);
        assert!(!store.has_more());
    }

    #[test]
    fn test_append_empty_delivery_signals_exhaustion() {
        let mut store: RecordStore<u32> = RecordStore::new((0..40).collect(), 20);
        assert!(store.has_more());

        store.append(Vec::new(), 20);
        assert_eq!(store.len(), 40);
        assert!(!store.has_more());
    }

    #[test]
    fn test_append_preserves_order_and_duplicates() {
        let mut store = RecordStore::new(vec![1, 2, 2], 20);
        store.append(vec![3, 1], 20);
        assert_eq!(store.records(), &[1, 2, 2, 3, 1]);
    }

    #[test]
    fn test_every_mutation_bumps_revision() {
        let mut store: RecordStore<u32> = RecordStore::new(Vec::new(), 20);
        assert_eq!(store.revision(), 0);

        store.replace(vec![1], 20);
        assert_eq!(store.revision(), 1);

        store.append(vec![2], 20);
        assert_eq!(store.revision(), 2);

        store.append(Vec::new(), 20);
        assert_eq!(store.revision(), 3);
    }
}
