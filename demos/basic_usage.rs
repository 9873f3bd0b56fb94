// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Basic view-engine usage example.
//!
//! Demonstrates:
//! 1. Wiring a `RecordSource` over an in-memory "backend"
//! 2. Refreshing the collection
//! 3. Debounced free-text search
//! 4. Categorical filtering
//! 5. Incremental load-more with the exhaustion heuristic
//! 6. View stats
//!
//! # Run
//!
//! ```bash
//! cargo run --example basic_usage
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use view_engine::{FilterCriterion, ListViewEngine, RecordSource, SourceError, ViewConfig};

/// Stand-in for a REST backend: a fixed table of vehicles served page by
/// page, with a little artificial latency.
struct VehicleBackend {
    table: Vec<Value>,
}

impl VehicleBackend {
    fn seeded() -> Self {
        let statuses = ["active", "active", "active", "maintenance", "retired"];
        let table = (0..45)
            .map(|i| {
                json!({
                    "status": statuses[i % statuses.len()],
                    "plate": format!("8B4 {i:04}"),
                    "model": if i % 2 == 0 { "Octavia" } else { "Crafter" },
                    "mileage": 10_000 + i * 137,
                })
            })
            .collect();
        Self { table }
    }
}

#[async_trait::async_trait]
impl RecordSource<Value> for VehicleBackend {
    async fn fetch_all(&self) -> Result<Vec<Value>, SourceError> {
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok(self.table.clone())
    }

    async fn fetch_page(&self, page: usize, page_size: usize) -> Result<Vec<Value>, SourceError> {
        tokio::time::sleep(Duration::from_millis(30)).await;
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(self.table.len());
        if start >= self.table.len() {
            return Ok(Vec::new());
        }
        Ok(self.table[start..end].to_vec())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Simple logging (no filter for simplicity)
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    println!("\n╔═══════════════════════════════════════════════════════════════╗");
    println!("║           view-engine: Basic Usage Example                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    // ─────────────────────────────────────────────────────────────────────────
    // 1. Configure the engine
    // ─────────────────────────────────────────────────────────────────────────
    println!("📦 Configuring view-engine...");

    let config = ViewConfig {
        page_size: 10,
        debounce_ms: 200,
        search_fields: vec!["plate".into(), "model".into(), "mileage".into()],
        ..Default::default()
    };
    let engine = ListViewEngine::new(config, Arc::new(VehicleBackend::seeded()))?;

    // ─────────────────────────────────────────────────────────────────────────
    // 2. Refresh the collection
    // ─────────────────────────────────────────────────────────────────────────
    println!("🔄 Refreshing from backend...");
    engine.refresh_data().await?;
    let stats = engine.stats();
    println!(
        "   loaded {} vehicles, showing {}, more available: {}\n",
        stats.total,
        stats.showing,
        engine.has_more()
    );

    // ─────────────────────────────────────────────────────────────────────────
    // 3. Debounced search
    // ─────────────────────────────────────────────────────────────────────────
    println!("🔍 Typing a search query (\"oct\", debounced)...");
    engine.set_search_query("o");
    engine.set_search_query("oc");
    engine.set_search_query("oct");
    tokio::time::sleep(Duration::from_millis(250)).await;
    println!(
        "   committed query: {:?}, {} matching rows visible\n",
        engine.committed_query(),
        engine.visible().len()
    );

    // ─────────────────────────────────────────────────────────────────────────
    // 4. Categorical filter
    // ─────────────────────────────────────────────────────────────────────────
    println!("🏷️  Filtering to status = \"maintenance\"...");
    engine.clear_filters();
    engine.set_selected_filter(FilterCriterion::from_value("maintenance"));
    for row in engine.visible() {
        println!("   {} ({})", row["plate"], row["model"]);
    }
    println!();

    // ─────────────────────────────────────────────────────────────────────────
    // 5. Load more pages until the source is exhausted
    // ─────────────────────────────────────────────────────────────────────────
    println!("📥 Loading more pages...");
    engine.clear_filters();
    while engine.has_more() {
        engine.load_more().await?;
        let stats = engine.stats();
        println!(
            "   page {}: showing {}/{} (more: {})",
            engine.current_page(),
            stats.showing,
            stats.total,
            engine.has_more()
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 6. Final stats
    // ─────────────────────────────────────────────────────────────────────────
    let stats = engine.stats();
    println!(
        "\n📊 Final view: total={} filtered={} showing={}",
        stats.total, stats.filtered, stats.showing
    );
    println!("\n✅ Done");
    Ok(())
}
