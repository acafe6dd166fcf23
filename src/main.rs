use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use price_watch::{
    aggregate, classify_raw, compute_statistics, history_newest_first, is_list_fresh,
    load_price_history_csv, load_product, load_search_results, load_watchlist, sort_by_price,
    stale_entries, PriceError, PriceRecord, RawPrice, Settings, SortDirection, SortKey,
};

#[derive(Parser)]
#[command(name = "price-watch", version, about = "Price history analytics and shopping watchlist totals")]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price statistics and history table for a product snapshot
    Stats { product: PathBuf },

    /// Compare a price with the product's historical average
    Classify { product: PathBuf, price: String },

    /// Watchlist grand total and per-catalog subtotals
    Totals { watchlist: PathBuf },

    /// Reorder search results by price, printed as JSON
    Sort {
        results: PathBuf,
        #[arg(long)]
        key: Option<SortKey>,
        #[arg(long)]
        direction: Option<SortDirection>,
    },

    /// Check whether the watchlist prices are from today
    Fresh {
        watchlist: PathBuf,
        /// Calendar date to check against (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Import a CSV price history and print its statistics
    ImportHistory { csv: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load_or_default(cli.config.as_deref())
        .context("Failed to load settings")?;
    settings.logging.init();

    match cli.command {
        Command::Stats { product } => run_stats(&product, &settings),
        Command::Classify { product, price } => run_classify(&product, &price),
        Command::Totals { watchlist } => run_totals(&watchlist, &settings),
        Command::Sort {
            results,
            key,
            direction,
        } => run_sort(
            &results,
            key.unwrap_or(settings.sorting.key),
            direction.unwrap_or(settings.sorting.direction),
        ),
        Command::Fresh { watchlist, today } => {
            run_fresh(&watchlist, today.unwrap_or_else(|| Local::now().date_naive()))
        }
        Command::ImportHistory { csv } => run_import_history(&csv, &settings),
    }
}

fn print_statistics(records: &[PriceRecord], settings: &Settings) {
    let symbol = &settings.display.currency_symbol;

    match compute_statistics(records) {
        Ok(stats) => {
            println!("📈 Price evolution");
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("   Min:    {:.2}{}", stats.min, symbol);
            println!("   Max:    {:.2}{}", stats.max, symbol);
            println!("   Avg:    {:.2}{}", stats.average_rounded(), symbol);
            println!("   Latest: {:.2}{}", stats.latest, symbol);
            if stats.skipped > 0 {
                println!("   ⚠️  {} record(s) with unreadable prices skipped", stats.skipped);
            }
        }
        // no statistics block at all, never zeros
        Err(PriceError::NoData) => println!("ℹ️  No price history available"),
        Err(e) => println!("❌ {}", e),
    }
}

fn print_history_table(records: &[PriceRecord]) {
    println!("\n🗓️  Price history");
    println!("{:<12} {:>12} {:>12} {:>16} {:>10}", "Date", "Regular", "Campaign", "Per quantity", "Quantity");

    for record in history_newest_first(records) {
        let optional = |raw: Option<&RawPrice>| raw.map(|r| r.to_string()).unwrap_or_default();
        println!(
            "{:<12} {:>12} {:>12} {:>16} {:>10}",
            record.date,
            record.regular_price.to_string(),
            optional(record.campaign_price.as_ref()),
            optional(record.price_per_quantity.as_ref()),
            record.quantity.as_ref().map(|q| q.to_string()).unwrap_or_default(),
        );
    }
}

fn run_stats(path: &Path, settings: &Settings) -> Result<()> {
    let product = load_product(path)?;

    println!(
        "🛒 {} ({}.{}.{})",
        product.name.as_deref().unwrap_or("-"),
        product.locale,
        product.catalog,
        product.reference
    );
    print_statistics(&product.prices, settings);
    print_history_table(&product.prices);

    Ok(())
}

fn run_classify(path: &Path, price: &str) -> Result<()> {
    let product = load_product(path)?;
    let level = classify_raw(&product.prices, &RawPrice::from(price))
        .with_context(|| format!("Cannot classify price {:?} for {}", price, product.key()))?;

    println!("{}", level.as_str());
    Ok(())
}

fn run_totals(path: &Path, settings: &Settings) -> Result<()> {
    let entries = load_watchlist(path)?;
    let totals = aggregate(&entries);
    let symbol = &settings.display.currency_symbol;

    println!("🧮 Watchlist totals");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for group in &totals.by_catalog {
        println!(
            "   {:<20} {:>10.2}{}  ({} entries)",
            group.catalog,
            group.subtotal_rounded(),
            symbol,
            group.entries.len()
        );
    }
    println!("   {:<20} {:>10.2}{}", "TOTAL", totals.grand_total_rounded(), symbol);

    if !totals.is_complete() {
        println!("\n⚠️  Price unknown, not counted:");
        for key in &totals.unpriced {
            println!("   - {}", key);
        }
    }

    Ok(())
}

fn run_sort(path: &Path, key: SortKey, direction: SortDirection) -> Result<()> {
    let results = load_search_results(path)?;
    let sorted = sort_by_price(&results, key, direction);

    let json = serde_json::to_string_pretty(&sorted).context("Failed to serialize sorted results")?;
    println!("{}", json);
    Ok(())
}

fn run_fresh(path: &Path, today: NaiveDate) -> Result<()> {
    let entries = load_watchlist(path)?;

    if is_list_fresh(&entries, today) {
        println!("✅ Prices are up to date ({})", today);
    } else {
        println!("🔄 Refresh prices: data older than {}", today);
        for entry in stale_entries(&entries, today) {
            println!("   - {}", entry.key);
        }
    }

    Ok(())
}

fn run_import_history(path: &Path, settings: &Settings) -> Result<()> {
    let records = load_price_history_csv(path)?;
    println!("✓ Loaded {} price records from {}\n", records.len(), path.display());

    print_statistics(&records, settings);
    Ok(())
}
