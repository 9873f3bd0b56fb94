// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Configuration for the view engine.
//!
//! # Example
//!
//! ```
//! use view_engine::ViewConfig;
//!
//! // Minimal config (uses defaults)
//! let config = ViewConfig::default();
//! assert_eq!(config.page_size, 20);
//! assert_eq!(config.debounce_ms, 300);
//!
//! // Full config
//! let config = ViewConfig {
//!     page_size: 50,
//!     debounce_ms: 150,
//!     search_fields: vec!["name".into(), "plate".into()],
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error raised at engine construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `page_size` must be at least 1; a zero page would make every view empty
    /// and the pagination heuristics meaningless.
    #[error("page_size must be at least 1, got {0}")]
    InvalidPageSize(usize),
}

/// A single selectable filter choice, advisory metadata for rendering.
///
/// The pipeline itself only consumes the selected criterion value; the
/// option list exists so callers can build a filter dropdown without a
/// second source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Human-readable label (e.g. "Active contracts")
    pub label: String,
    /// Criterion value matched against records (e.g. "active")
    pub value: String,
}

/// Configuration for a [`ListViewEngine`](crate::ListViewEngine).
///
/// All fields have sensible defaults. At minimum you should configure
/// `search_fields`, otherwise free-text search matches nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    /// Number of records revealed per page (default: 20)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Quiet period in milliseconds before a typed search query commits
    /// (default: 300)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Record fields consulted by free-text search, in declaration order
    #[serde(default)]
    pub search_fields: Vec<String>,

    /// Advisory filter choices for rendering a dropdown
    #[serde(default)]
    pub filter_options: Vec<FilterOption>,
}

fn default_page_size() -> usize {
    20
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            search_fields: Vec::new(),
            filter_options: Vec::new(),
        }
    }
}

impl ViewConfig {
    /// Validate the configuration.
    ///
    /// Called by the engine constructor; exposed so callers can check a
    /// deserialized config before wiring it up.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.debounce_ms, 300);
        assert!(config.search_fields.is_empty());
        assert!(config.filter_options.is_empty());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = ViewConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPageSize(0))
        ));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(ViewConfig::default().validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_partial_fields() {
        let config: ViewConfig = serde_json::from_str(
            r#"{"page_size": 10, "search_fields": ["name"]}"#,
        )
        .unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.search_fields, vec!["name".to_string()]);
    }

    #[test]
    fn test_filter_option_roundtrip() {
        let opt = FilterOption {
            label: "Active".into(),
            value: "active".into(),
        };
        let json = serde_json::to_string(&opt).unwrap();
        let back: FilterOption = serde_json::from_str(&json).unwrap();
        assert_eq!(opt, back);
    }
}
