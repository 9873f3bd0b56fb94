//! Property-based tests for the view derivation pipeline.
//!
//! Uses proptest to generate arbitrary collections, criteria, and queries
//! and verify the pipeline laws hold for all of them: filter identity and
//! soundness, search case-insensitivity, and the visible-prefix length law.
//!
//! Run with: `cargo test --test proptest_fuzz`

use proptest::prelude::*;
use serde_json::{json, Value};

use view_engine::{derive_rows, FilterCriterion, ViewRecord};

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// A record that may or may not carry one of the conventional filter keys,
/// with string and numeric searchable fields.
fn record_strategy() -> impl Strategy<Value = Value> {
    (
        prop_oneof![
            Just(None),
            ("(status|type|category)", "[a-z]{1,6}").prop_map(Some),
        ],
        "[a-zA-Z0-9 ]{0,12}",
        any::<u32>(),
    )
        .prop_map(|(key, name, amount)| {
            let mut record = json!({"name": name, "amount": amount});
            if let Some((field, value)) = key {
                record[field] = Value::String(value);
            }
            record
        })
}

fn collection_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(record_strategy(), 0..50)
}

fn criterion_strategy() -> impl Strategy<Value = FilterCriterion> {
    prop_oneof![
        Just(FilterCriterion::All),
        "[a-z]{1,6}".prop_map(FilterCriterion::Value),
    ]
}

fn fields() -> Vec<String> {
    vec!["name".to_string(), "amount".to_string()]
}

// =============================================================================
// Pipeline Laws
// =============================================================================

proptest! {
    /// Filtering with the "all" sentinel returns the collection unchanged.
    #[test]
    fn filter_all_is_identity(records in collection_strategy()) {
        let rows = derive_rows(&records, &FilterCriterion::All, "", &fields());
        prop_assert_eq!(rows, records);
    }

    /// Every record surviving a value filter either has a matching key or
    /// no key at all.
    #[test]
    fn filter_is_sound(
        records in collection_strategy(),
        criterion in criterion_strategy(),
    ) {
        let rows = derive_rows(&records, &criterion, "", &fields());
        if let FilterCriterion::Value(ref wanted) = criterion {
            for row in &rows {
                let key = row.filter_key();
                prop_assert!(key.is_none() || key == Some(wanted.as_str()));
            }
        }
    }

    /// A whitespace-only query never changes the derived sequence.
    #[test]
    fn whitespace_query_is_identity(
        records in collection_strategy(),
        padding in "[ \t]{0,8}",
    ) {
        let unfiltered = derive_rows(&records, &FilterCriterion::All, "", &fields());
        let padded = derive_rows(&records, &FilterCriterion::All, &padding, &fields());
        prop_assert_eq!(unfiltered, padded);
    }

    /// Search results are identical regardless of query casing.
    #[test]
    fn search_is_case_insensitive(
        records in collection_strategy(),
        query in "[a-zA-Z0-9]{1,8}",
    ) {
        let lower = derive_rows(&records, &FilterCriterion::All, &query.to_lowercase(), &fields());
        let upper = derive_rows(&records, &FilterCriterion::All, &query.to_uppercase(), &fields());
        prop_assert_eq!(lower, upper);
    }

    /// Every searched-in row contains the query in a declared field.
    #[test]
    fn search_is_sound(
        records in collection_strategy(),
        query in "[a-z0-9]{1,8}",
    ) {
        let rows = derive_rows(&records, &FilterCriterion::All, &query, &fields());
        for row in &rows {
            let matched = fields().iter().any(|f| {
                row.search_field(f)
                    .is_some_and(|v| v.contains(&query))
            });
            prop_assert!(matched);
        }
    }

    /// The derived sequence preserves collection order.
    #[test]
    fn derivation_preserves_order(
        records in collection_strategy(),
        criterion in criterion_strategy(),
        query in "[a-z0-9]{0,4}",
    ) {
        let rows = derive_rows(&records, &criterion, &query, &fields());
        // Each derived row appears in the collection at or after the
        // position of the previous one.
        let mut cursor = 0;
        for row in &rows {
            let found = records[cursor..].iter().position(|r| r == row);
            match found {
                Some(offset) => cursor += offset,
                None => prop_assert!(false, "derived row out of collection order"),
            }
        }
    }

    /// visible prefix law: the page window never exceeds the derived
    /// sequence or the requested prefix.
    #[test]
    fn visible_prefix_length_law(
        derived_len in 0usize..500,
        page in 1usize..20,
        page_size in 1usize..50,
    ) {
        let len = view_engine::pipeline::visible_len(derived_len, page, page_size);
        prop_assert_eq!(len, (page * page_size).min(derived_len));
    }
}
