// ↕️ Product Sorter - Reorder each catalog's products by price
// The catalog order itself never changes; only the product list inside each one.

use crate::error::ConfigError;
use crate::models::{CatalogSearchResult, Money, Product};
use crate::parser::{effective_price, price_per_unit};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// ============================================================================
// SORT OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Effective price (campaign or regular)
    #[default]
    Price,
    /// Parsed price-per-quantity field
    PricePerUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "price_per_unit" | "price-per-unit" | "unit" => Ok(SortKey::PricePerUnit),
            other => Err(ConfigError::InvalidValue {
                field: "sort key",
                reason: format!("unknown key '{}', expected price or price-per-unit", other),
            }),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(ConfigError::InvalidValue {
                field: "sort direction",
                reason: format!("unknown direction '{}', expected asc or desc", other),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Price => write!(f, "price"),
            SortKey::PricePerUnit => write!(f, "price-per-unit"),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

// ============================================================================
// SORTING
// ============================================================================

/// Sort key value of a product; `None` when the price is unknown
pub fn sort_value(product: &Product, key: SortKey) -> Option<Money> {
    let parsed = match key {
        SortKey::Price => effective_price(product),
        SortKey::PricePerUnit => price_per_unit(product),
    };
    parsed.ok()
}

/// Numeric comparison; unknown prices always sort after known ones
fn compare(a: Option<Money>, b: Option<Money>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.total_cmp(&b),
            SortDirection::Desc => b.total_cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorted copy of a product list
///
/// The sort is stable: equal keys keep their relative order.
pub fn sort_products(products: &[Product], key: SortKey, direction: SortDirection) -> Vec<Product> {
    let mut keyed: Vec<(Option<Money>, &Product)> = products
        .iter()
        .map(|product| (sort_value(product, key), product))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare(*a, *b, direction));

    let unknown = keyed.iter().filter(|(value, _)| value.is_none()).count();
    if unknown > 0 {
        debug!(unknown, key = %key, "products without a usable price sorted last");
    }

    keyed.into_iter().map(|(_, product)| product.clone()).collect()
}

/// Reorder every catalog's products by price
///
/// Returns a new result set: catalogs in their original order, each with a
/// freshly sorted product list. Unknown prices sink to the end in both
/// directions (ascending treats them as +∞).
pub fn sort_by_price(
    results: &[CatalogSearchResult],
    key: SortKey,
    direction: SortDirection,
) -> Vec<CatalogSearchResult> {
    results
        .iter()
        .map(|result| CatalogSearchResult {
            products: sort_products(&result.products, key, direction),
            ..result.clone()
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
