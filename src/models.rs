// 📦 Data Model - Products, price history and watchlist entries
// Plain data handed over by the fetch/store layer. The engine only reads it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical numeric price. Full precision; round only for display.
pub type Money = f64;

// ============================================================================
// RAW VALUES
// ============================================================================

/// RawPrice - A price exactly as the feed delivered it
///
/// Feeds mix JSON numbers (`1.99`) and formatted strings (`"1,99 €"`).
/// Use `parser::parse_price` to get a `Money` out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    /// Empty or whitespace-only text counts as "no value"
    pub fn is_blank(&self) -> bool {
        match self {
            RawPrice::Number(_) => false,
            RawPrice::Text(s) => s.trim().is_empty(),
        }
    }
}

impl Default for RawPrice {
    fn default() -> Self {
        RawPrice::Text(String::new())
    }
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Number(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_string())
    }
}

impl fmt::Display for RawPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawPrice::Number(n) => write!(f, "{}", n),
            RawPrice::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Package size label: `"1 kg"`, `"6 x 33 cl"` or a bare number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityLabel {
    Number(f64),
    Text(String),
}

impl fmt::Display for QuantityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityLabel::Number(n) => write!(f, "{}", n),
            QuantityLabel::Text(s) => write!(f, "{}", s),
        }
    }
}

// ============================================================================
// PRICE RECORD
// ============================================================================

/// PriceRecord - One historical price observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    /// Observation date as delivered (`2024-01-08` or a full timestamp)
    pub date: String,

    #[serde(default)]
    pub regular_price: RawPrice,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_price: Option<RawPrice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_quantity: Option<RawPrice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<QuantityLabel>,
}

impl PriceRecord {
    pub fn new(date: &str, regular_price: impl Into<RawPrice>) -> Self {
        PriceRecord {
            date: date.to_string(),
            regular_price: regular_price.into(),
            campaign_price: None,
            price_per_quantity: None,
            quantity: None,
        }
    }

    /// Builder pattern: add campaign price
    pub fn with_campaign(mut self, campaign_price: impl Into<RawPrice>) -> Self {
        self.campaign_price = Some(campaign_price.into());
        self
    }

    /// Builder pattern: add price per quantity
    pub fn with_price_per_quantity(mut self, price_per_quantity: impl Into<RawPrice>) -> Self {
        self.price_per_quantity = Some(price_per_quantity.into());
        self
    }

    /// Calendar date of the observation (time of day discarded)
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }
}

// ============================================================================
// PRODUCT
// ============================================================================

/// Product - Identified by (locale, catalog, reference)
///
/// Search results carry the current price fields; detail fetches also
/// carry `prices`, the history. History order is whatever the feed sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub locale: String,

    #[serde(default)]
    pub catalog: String,

    pub reference: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ean_upc: Vec<String>,

    #[serde(default)]
    pub regular_price: RawPrice,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_price: Option<RawPrice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_quantity: Option<RawPrice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<QuantityLabel>,

    /// When the current price fields were fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prices: Vec<PriceRecord>,
}

impl Product {
    pub fn new(locale: &str, catalog: &str, reference: &str) -> Self {
        Product {
            locale: locale.to_string(),
            catalog: catalog.to_string(),
            reference: reference.to_string(),
            ..Default::default()
        }
    }

    /// Builder pattern: set current regular price
    pub fn with_price(mut self, regular_price: impl Into<RawPrice>) -> Self {
        self.regular_price = regular_price.into();
        self
    }

    /// Builder pattern: set current campaign price
    pub fn with_campaign(mut self, campaign_price: impl Into<RawPrice>) -> Self {
        self.campaign_price = Some(campaign_price.into());
        self
    }

    /// Builder pattern: set current price per quantity
    pub fn with_price_per_quantity(mut self, price_per_quantity: impl Into<RawPrice>) -> Self {
        self.price_per_quantity = Some(price_per_quantity.into());
        self
    }

    /// Builder pattern: set price history
    pub fn with_history(mut self, prices: Vec<PriceRecord>) -> Self {
        self.prices = prices;
        self
    }

    /// Builder pattern: set fetch date
    pub fn with_date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    /// Watchlist key for this product
    pub fn key(&self) -> String {
        entry_key(&self.locale, &self.catalog, &self.reference)
    }
}

// ============================================================================
// WATCHLIST
// ============================================================================

/// Identity key of a watchlist entry: `locale.catalog.reference`
pub fn entry_key(locale: &str, catalog: &str, reference: &str) -> String {
    format!("{}.{}.{}", locale, catalog, reference)
}

fn default_history_enabled() -> bool {
    true
}

/// WatchlistEntry - A product snapshot plus the wanted quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub key: String,
    pub locale: String,
    pub catalog: String,
    pub product: Product,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default = "default_history_enabled")]
    pub history_enabled: bool,
}

impl WatchlistEntry {
    pub fn new(locale: &str, catalog: &str, product: Product, quantity: u32) -> Self {
        WatchlistEntry {
            key: entry_key(locale, catalog, &product.reference),
            locale: locale.to_string(),
            catalog: catalog.to_string(),
            product,
            quantity,
            history_enabled: true,
        }
    }

    /// Builder pattern: toggle price history tracking
    pub fn with_history_enabled(mut self, history_enabled: bool) -> Self {
        self.history_enabled = history_enabled;
        self
    }
}

// ============================================================================
// SEARCH RESULTS
// ============================================================================

/// CatalogSearchResult - One catalog's slice of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSearchResult {
    pub locale: String,
    pub catalog: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub history_enabled: bool,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl CatalogSearchResult {
    pub fn new(locale: &str, catalog: &str, products: Vec<Product>) -> Self {
        CatalogSearchResult {
            locale: locale.to_string(),
            catalog: catalog.to_string(),
            name: None,
            history_enabled: true,
            products,
        }
    }
}

// ============================================================================
// DATES
// ============================================================================

/// Parse a feed date into its calendar day
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the day in their own offset)
/// and naive `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` timestamps.
pub fn parse_calendar_date(date_str: &str) -> Option<NaiveDate> {
    let date_str = date_str.trim();

    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(date_str) {
        return Some(timestamp.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(timestamp.date());
        }
    }

    None
}

// ============================================================================
// TESTS
// ============================================================================
