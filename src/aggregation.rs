// 🧮 Catalog Aggregator - Watchlist totals per catalog and overall
//
// Contribution of an entry = effective price × quantity.
// Sums run at full precision; rounding happens only at the output boundary.

use crate::models::{Money, WatchlistEntry};
use crate::parser::{effective_price, round_money};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// One catalog's slice of the watchlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogGroup {
    pub catalog: String,
    pub entries: Vec<WatchlistEntry>,
    pub subtotal: Money,
}

impl CatalogGroup {
    pub fn subtotal_rounded(&self) -> Money {
        round_money(self.subtotal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistTotals {
    pub grand_total: Money,
    /// Groups in first-seen catalog order
    pub by_catalog: Vec<CatalogGroup>,
    /// Keys of entries whose price could not be parsed (contributed nothing)
    pub unpriced: Vec<String>,
}

impl WatchlistTotals {
    pub fn grand_total_rounded(&self) -> Money {
        round_money(self.grand_total)
    }

    pub fn is_complete(&self) -> bool {
        self.unpriced.is_empty()
    }

    pub fn summary(&self) -> String {
        let catalogs: Vec<String> = self
            .by_catalog
            .iter()
            .map(|g| format!("{}: {:.2}", g.catalog, g.subtotal))
            .collect();

        format!("Total {:.2} ({})", self.grand_total, catalogs.join("; "))
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Price contribution of one entry
///
/// `None` when the product price is unknown.
pub fn entry_contribution(entry: &WatchlistEntry) -> Option<Money> {
    match effective_price(&entry.product) {
        Ok(price) => Some(price * f64::from(entry.quantity)),
        Err(e) => {
            warn!(key = %entry.key, error = %e, "watchlist entry has no usable price");
            None
        }
    }
}

/// Group a watchlist by catalog and total it
///
/// Zero-quantity entries stay in their group and contribute 0.
/// Entries with unknown prices stay in their group, contribute nothing,
/// and are listed in `unpriced`.
///
/// # Example:
/// ```
/// use price_watch::{aggregate, Product, WatchlistEntry};
///
/// let entries = vec![
///     WatchlistEntry::new("pt", "A", Product::new("pt", "A", "1").with_price(5.0), 2),
///     WatchlistEntry::new("pt", "A", Product::new("pt", "A", "2").with_price(3.0), 1),
///     WatchlistEntry::new("pt", "B", Product::new("pt", "B", "3").with_price(10.0), 1),
/// ];
/// let totals = aggregate(&entries);
/// assert_eq!(totals.grand_total, 23.0);
/// assert_eq!(totals.by_catalog[0].subtotal, 13.0);
/// ```
pub fn aggregate(entries: &[WatchlistEntry]) -> WatchlistTotals {
    let mut by_catalog: Vec<CatalogGroup> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    let mut unpriced = Vec::new();
    let mut grand_total: Money = 0.0;

    for entry in entries {
        let index = *group_index.entry(entry.catalog.as_str()).or_insert_with(|| {
            by_catalog.push(CatalogGroup {
                catalog: entry.catalog.clone(),
                entries: Vec::new(),
                subtotal: 0.0,
            });
            by_catalog.len() - 1
        });

        let group = &mut by_catalog[index];
        group.entries.push(entry.clone());

        match entry_contribution(entry) {
            Some(contribution) => {
                group.subtotal += contribution;
                grand_total += contribution;
            }
            None => unpriced.push(entry.key.clone()),
        }
    }

    WatchlistTotals {
        grand_total,
        by_catalog,
        unpriced,
    }
}

// ============================================================================
// TESTS
// ============================================================================
