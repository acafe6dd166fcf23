// 📂 Snapshots - Load already-fetched data from disk
// JSON snapshots for products, search results and the watchlist;
// CSV import for a price history.

use crate::models::{CatalogSearchResult, PriceRecord, Product, QuantityLabel, RawPrice, WatchlistEntry};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", what, path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} JSON: {}", what, path.display()))
}

/// Load one product (with its price history)
pub fn load_product(path: &Path) -> Result<Product> {
    load_json(path, "product")
}

/// Load a search result set
pub fn load_search_results(path: &Path) -> Result<Vec<CatalogSearchResult>> {
    load_json(path, "search results")
}

/// Load a watchlist snapshot
///
/// Fails on duplicate keys: a key identifies exactly one entry.
pub fn load_watchlist(path: &Path) -> Result<Vec<WatchlistEntry>> {
    let entries: Vec<WatchlistEntry> = load_json(path, "watchlist")?;

    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.key.as_str()) {
            anyhow::bail!("Duplicate watchlist key '{}' in {}", entry.key, path.display());
        }
    }

    info!(entries = entries.len(), path = %path.display(), "loaded watchlist");
    Ok(entries)
}

/// Import a price history from CSV
///
/// Header row expected: `date,regularPrice,campaignPrice,pricePerQuantity,quantity`.
/// Only `date` and `regularPrice` are required; empty cells mean "absent".
/// Rows without a date are skipped.
pub fn load_price_history_csv(csv_path: &Path) -> Result<Vec<PriceRecord>> {
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open file: {}", csv_path.display()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let filename = csv_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown.csv")
        .to_string();

    let mut records = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        let row = result.with_context(|| {
            format!("Failed to parse CSV line {} in {}", line_num + 2, filename)
        })?;

        let cell = |index: usize| row.get(index).filter(|value| !value.is_empty());

        let date = match cell(0) {
            Some(date) => date.to_string(),
            None => {
                warn!(line = line_num + 2, file = %filename, "skipping row without date");
                continue;
            }
        };

        records.push(PriceRecord {
            date,
            regular_price: cell(1).map(RawPrice::from).unwrap_or_default(),
            campaign_price: cell(2).map(RawPrice::from),
            price_per_quantity: cell(3).map(RawPrice::from),
            quantity: cell(4).map(|q| QuantityLabel::Text(q.to_string())),
        });
    }

    info!(records = records.len(), file = %filename, "imported price history");
    Ok(records)
}
