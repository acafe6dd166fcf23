// Price Watch - Core Library
// Price analytics and watchlist aggregation over already-fetched catalog data.
// Exposes all modules for use in the CLI and tests.

pub mod error;
pub mod models;
pub mod parser;         // Raw prices → Money
pub mod statistics;     // min / max / average / latest
pub mod indicator;      // below / at / above average
pub mod aggregation;    // per-catalog and grand totals
pub mod sorting;        // price ordering of search results
pub mod staleness;      // refresh signal for the watchlist
pub mod watchlist;      // add / remove helpers
pub mod search;         // search validation and lookup
pub mod snapshot;       // JSON / CSV loading
pub mod config;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{ConfigError, PriceError, SearchError};
pub use models::{
    entry_key, parse_calendar_date,
    CatalogSearchResult, Money, PriceRecord, Product, QuantityLabel, RawPrice, WatchlistEntry,
};
pub use parser::{
    effective_price, parse_price, parse_price_str, price_per_unit, round_money, PriceSource,
};
pub use statistics::{
    average_price, chart_points, compute_statistics, history_newest_first,
    ChartPoint, PriceStatistics,
};
pub use indicator::{classify, classify_raw, PriceLevel};
pub use aggregation::{aggregate, entry_contribution, CatalogGroup, WatchlistTotals};
pub use sorting::{sort_by_price, sort_products, sort_value, SortDirection, SortKey};
pub use staleness::{is_entry_fresh, is_list_fresh, latest_price_date, stale_entries};
pub use watchlist::{add_product, find_entry, remove_one, set_quantity};
pub use search::{default_selection, find_product, CatalogSelection, SearchRequest};
pub use snapshot::{load_price_history_csv, load_product, load_search_results, load_watchlist};
pub use config::{DisplayConfig, LoggingConfig, Settings, SortingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
