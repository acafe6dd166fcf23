// 📈 Price Statistics - min / max / average / latest over a price history
// Plus the derived history views: newest-first table and chart series.

use crate::error::PriceError;
use crate::models::{Money, PriceRecord};
use crate::parser::{effective_price, price_per_unit, round_money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ============================================================================
// STATISTICS
// ============================================================================

/// Statistics block for one product's history
///
/// All values are effective prices at full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub min: Money,
    pub max: Money,
    /// Unrounded mean; use `average_rounded` for display
    pub average: Money,
    pub latest: Money,
    /// Records that contributed
    pub sample_count: usize,
    /// Records skipped because their price could not be parsed
    pub skipped: usize,
}

impl PriceStatistics {
    pub fn average_rounded(&self) -> Money {
        round_money(self.average)
    }

    pub fn summary(&self) -> String {
        format!(
            "min {:.2}, max {:.2}, avg {:.2}, latest {:.2} ({} records, {} skipped)",
            self.min,
            self.max,
            self.average,
            self.latest,
            self.sample_count,
            self.skipped
        )
    }
}

/// A record whose effective price parsed
struct PricedRecord<'a> {
    raw_date: &'a str,
    date: Option<NaiveDate>,
    price: Money,
}

/// Effective prices of every parseable record, input order kept
fn priced_records(records: &[PriceRecord]) -> Vec<PricedRecord<'_>> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match effective_price(record) {
            Ok(price) => Some(PricedRecord {
                raw_date: &record.date,
                date: record.calendar_date(),
                price,
            }),
            Err(e) => {
                warn!(index, date = %record.date, error = %e, "skipping price record");
                None
            }
        })
        .collect()
}

/// Compute statistics over a price history
///
/// Unparseable records are skipped. An empty history (or one where
/// nothing parses) is `PriceError::NoData`, never zeros.
///
/// `latest` comes from the most recent dated record. Records sharing that
/// date resolve to the first one in input order. Undated records are only
/// used when no record has a readable date, in which case the last one wins.
///
/// # Example:
/// ```
/// use price_watch::{compute_statistics, PriceRecord};
///
/// let records = vec![
///     PriceRecord::new("2024-01-01", 10.0),
///     PriceRecord::new("2024-01-08", 8.0).with_campaign(6.0),
/// ];
/// let stats = compute_statistics(&records).unwrap();
/// assert_eq!((stats.min, stats.max, stats.average, stats.latest), (6.0, 10.0, 8.0, 6.0));
/// ```
pub fn compute_statistics(records: &[PriceRecord]) -> Result<PriceStatistics, PriceError> {
    let priced = priced_records(records);

    if priced.is_empty() {
        debug!(records = records.len(), "no usable price records");
        return Err(PriceError::NoData);
    }

    let min = priced
        .iter()
        .map(|r| r.price)
        .fold(f64::INFINITY, f64::min);
    let max = priced
        .iter()
        .map(|r| r.price)
        .fold(f64::NEG_INFINITY, f64::max);
    let sum: Money = priced.iter().map(|r| r.price).sum();
    let average = sum / priced.len() as f64;

    let latest = latest_price(&priced).ok_or(PriceError::NoData)?;

    Ok(PriceStatistics {
        min,
        max,
        average,
        latest,
        sample_count: priced.len(),
        skipped: records.len() - priced.len(),
    })
}

/// Unrounded average effective price
pub fn average_price(records: &[PriceRecord]) -> Result<Money, PriceError> {
    compute_statistics(records).map(|stats| stats.average)
}

fn latest_price(priced: &[PricedRecord<'_>]) -> Option<Money> {
    // Working copy, newest first; sort is stable so equal dates keep input order
    let mut dated: Vec<&PricedRecord<'_>> = priced
        .iter()
        .filter(|r| {
            if r.date.is_none() {
                warn!(raw_date = %r.raw_date, "skipping record with unreadable date for latest");
            }
            r.date.is_some()
        })
        .collect();
    dated.sort_by(|a, b| b.date.cmp(&a.date));

    match dated.first() {
        Some(record) => Some(record.price),
        None => {
            warn!("no readable dates in price history, using last record");
            priced.last().map(|r| r.price)
        }
    }
}

// ============================================================================
// HISTORY VIEWS
// ============================================================================

/// Copy of the history sorted newest first
///
/// Records with unreadable dates sink to the end in input order.
pub fn history_newest_first(records: &[PriceRecord]) -> Vec<PriceRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| match (a.calendar_date(), b.calendar_date()) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    sorted
}

/// One point of the price evolution chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: String,
    pub price: Option<Money>,
    pub price_per_quantity: Option<Money>,
    pub quantity: Option<String>,
}

/// Chart series in input order; unparseable prices become gaps
pub fn chart_points(records: &[PriceRecord]) -> Vec<ChartPoint> {
    records
        .iter()
        .map(|record| ChartPoint {
            date: record.date.clone(),
            price: effective_price(record).ok(),
            price_per_quantity: price_per_unit(record).ok(),
            quantity: record.quantity.as_ref().map(|q| q.to_string()),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
