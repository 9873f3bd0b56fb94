//! Record abstraction for filtering and searching.
//!
//! The engine is generic over the record type; it only needs structural
//! access to the small set of fields used by the filter and the free-text
//! search. [`ViewRecord`] is that seam: a categorical key for the filter
//! and named scalar fields for the search. A blanket implementation for
//! [`serde_json::Value`] covers callers whose rows arrive as raw JSON.

use serde_json::Value;

/// Conventional field names probed by the [`serde_json::Value`]
/// implementation, in priority order.
const FILTER_KEYS: [&str; 3] = ["status", "type", "category"];

/// A record field coerced to a comparable scalar.
///
/// Free-text search only considers string and numeric fields; everything
/// else (objects, arrays, booleans, null) is unsearchable.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Case-insensitive substring match against an already-lowercased needle.
    ///
    /// Numbers are compared via their decimal string rendering, so searching
    /// "120" finds the amount `120.5` and searching "20" finds `120`.
    #[must_use]
    pub fn contains(&self, needle_lower: &str) -> bool {
        match self {
            Self::Text(s) => s.to_lowercase().contains(needle_lower),
            Self::Number(n) => n.to_string().contains(needle_lower),
        }
    }
}

/// Structural access the view pipeline needs from a record.
///
/// Implement this for your row type instead of relying on runtime field
/// probing. The filter consults [`filter_key`](Self::filter_key); the
/// search consults [`search_field`](Self::search_field) for each field
/// declared in [`ViewConfig::search_fields`](crate::ViewConfig).
///
/// # Example
///
/// ```
/// use view_engine::{FieldValue, ViewRecord};
///
/// struct Vehicle {
///     plate: String,
///     status: String,
///     mileage: u32,
/// }
///
/// impl ViewRecord for Vehicle {
///     fn filter_key(&self) -> Option<&str> {
///         Some(&self.status)
///     }
///
///     fn search_field(&self, field: &str) -> Option<FieldValue> {
///         match field {
///             "plate" => Some(FieldValue::Text(self.plate.clone())),
///             "mileage" => Some(FieldValue::Number(f64::from(self.mileage))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ViewRecord {
    /// The record's categorical key, matched against the selected filter
    /// criterion. Return `None` for records with no such field; they pass
    /// every filter.
    fn filter_key(&self) -> Option<&str>;

    /// A named field coerced to a searchable scalar, or `None` when the
    /// field is absent or not a scalar.
    fn search_field(&self, field: &str) -> Option<FieldValue>;
}

/// JSON rows keep the conventional shape: the first of `status`, `type`,
/// `category` holding a string is the filter key, and any string or numeric
/// member is searchable by name.
impl ViewRecord for Value {
    fn filter_key(&self) -> Option<&str> {
        FILTER_KEYS
            .iter()
            .find_map(|key| self.get(key).and_then(Value::as_str))
    }

    fn search_field(&self, field: &str) -> Option<FieldValue> {
        match self.get(field)? {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            _ => None,
        }
    }
}
