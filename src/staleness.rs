// ⏰ Staleness Checker - Is the watchlist's price data from today?
// "today" is always passed in; nothing here reads the clock.

use crate::models::{parse_calendar_date, Product, WatchlistEntry};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Calendar date of the product's most recent price data
///
/// Newest readable date in the history; without history, the product's
/// own fetch date.
pub fn latest_price_date(product: &Product) -> Option<NaiveDate> {
    let from_history = product
        .prices
        .iter()
        .filter_map(|record| {
            let date = record.calendar_date();
            if date.is_none() {
                warn!(
                    key = %product.key(),
                    date = %record.date,
                    "skipping record with unreadable date"
                );
            }
            date
        })
        .max();

    from_history.or_else(|| product.date.as_deref().and_then(parse_calendar_date))
}

/// Fresh iff the latest price date is `today`. No readable date = stale.
pub fn is_entry_fresh(entry: &WatchlistEntry, today: NaiveDate) -> bool {
    latest_price_date(&entry.product) == Some(today)
}

/// Entries with history enabled whose data is not from `today`
pub fn stale_entries(entries: &[WatchlistEntry], today: NaiveDate) -> Vec<&WatchlistEntry> {
    entries
        .iter()
        .filter(|entry| entry.history_enabled)
        .filter(|entry| !is_entry_fresh(entry, today))
        .collect()
}

/// Whole-list refresh signal
///
/// True when every history-enabled entry is fresh; entries with history
/// disabled are ignored. An empty list is fresh.
pub fn is_list_fresh(entries: &[WatchlistEntry], today: NaiveDate) -> bool {
    let stale = stale_entries(entries, today);

    if !stale.is_empty() {
        debug!(
            stale = stale.len(),
            first = %stale[0].key,
            %today,
            "watchlist needs a price refresh"
        );
    }

    stale.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceRecord;
    use crate::test_support::capture_logs;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry_with_history(reference: &str, dates: &[&str]) -> WatchlistEntry {
        let prices = dates.iter().map(|d| PriceRecord::new(d, 1.0)).collect();
        let product = Product::new("pt", "continente", reference).with_history(prices);
        WatchlistEntry::new("pt", "continente", product, 1)
    }

    #[test]
    fn test_unreadable_date_is_logged() {
        let product = Product::new("pt", "continente", "7").with_history(vec![
            PriceRecord::new("2024-01-08", 1.0),
            PriceRecord::new("ontem", 1.0),
        ]);

        let logs = capture_logs(|| {
            assert_eq!(latest_price_date(&product), Some(day(2024, 1, 8)));
        });

        assert!(logs.contains("WARN"));
        assert!(logs.contains("ontem"));
        assert!(logs.contains("pt.continente.7"));
    }

    #[test]
    fn test_empty_list_is_fresh() {
        assert!(is_list_fresh(&[], day(2024, 1, 8)));
    }

    #[test]
    fn test_fresh_when_latest_record_is_today() {
        // unordered history, latest is 2024-01-08
        let entries = vec![entry_with_history("1", &["2024-01-08T18:45:00Z", "2024-01-01"])];
        assert!(is_list_fresh(&entries, day(2024, 1, 8)));
    }

    #[test]
    fn test_one_day_old_is_stale() {
        let entries = vec![
            entry_with_history("1", &["2024-01-08"]),
            entry_with_history("2", &["2024-01-07"]),
        ];

        assert!(!is_list_fresh(&entries, day(2024, 1, 8)));

        let stale = stale_entries(&entries, day(2024, 1, 8));
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].key, "pt.continente.2");
    }

    #[test]
    fn test_every_entry_counts_not_just_the_last() {
        let entries = vec![
            entry_with_history("1", &["2024-01-01"]),
            entry_with_history("2", &["2024-01-08"]),
        ];

        assert!(!is_list_fresh(&entries, day(2024, 1, 8)));
    }

    #[test]
    fn test_history_disabled_entries_ignored() {
        let entries = vec![
            entry_with_history("1", &["2024-01-08"]),
            entry_with_history("2", &["2020-01-01"]).with_history_enabled(false),
        ];

        assert!(is_list_fresh(&entries, day(2024, 1, 8)));
    }

    #[test]
    fn test_falls_back_to_product_date() {
        let product = Product::new("pt", "auchan", "9").with_date("2024-01-08T07:00:00");
        let entries = vec![WatchlistEntry::new("pt", "auchan", product, 1)];

        assert!(is_list_fresh(&entries, day(2024, 1, 8)));
        assert!(!is_list_fresh(&entries, day(2024, 1, 9)));
    }

    #[test]
    fn test_no_readable_date_is_stale() {
        let entries = vec![entry_with_history("1", &["not a date"])];
        assert!(!is_list_fresh(&entries, day(2024, 1, 8)));

        let bare = WatchlistEntry::new("pt", "auchan", Product::new("pt", "auchan", "2"), 1);
        assert!(!is_entry_fresh(&bare, day(2024, 1, 8)));
    }

    #[test]
    fn test_future_date_is_not_fresh() {
        let entries = vec![entry_with_history("1", &["2024-01-09"])];
        assert!(!is_list_fresh(&entries, day(2024, 1, 8)));
    }
}
