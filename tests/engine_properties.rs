// Cross-module properties of the price engine

use chrono::NaiveDate;
use price_watch::{
    aggregate, classify, compute_statistics, is_list_fresh, sort_by_price, CatalogSearchResult,
    PriceLevel, PriceRecord, Product, SortDirection, SortKey, WatchlistEntry,
};

fn history() -> Vec<PriceRecord> {
    vec![
        PriceRecord::new("2024-02-05", "1,49 €"),
        PriceRecord::new("2024-01-01", "1,29 €"),
        PriceRecord::new("2024-03-11", "1,59 €").with_campaign("1,09 €"),
        PriceRecord::new("2024-02-19", "1,39 €"),
        PriceRecord::new("2024-01-15", "sem stock"),
    ]
}

#[test]
fn test_statistics_bounds_on_mixed_history() {
    let stats = compute_statistics(&history()).unwrap();

    assert!(stats.min <= stats.average && stats.average <= stats.max);
    assert!(stats.min <= stats.latest && stats.latest <= stats.max);
    assert_eq!(stats.min, 1.09);
    assert_eq!(stats.max, 1.49);
    assert_eq!(stats.latest, 1.09);
    assert_eq!(stats.skipped, 1);
}

#[test]
fn test_classify_agrees_with_statistics() {
    let records = history();
    let average = compute_statistics(&records).unwrap().average;

    for candidate in [0.5, 1.09, 1.30, average, 1.31, 1.49, 3.0] {
        let level = classify(&records, candidate).unwrap();
        assert_eq!(level == PriceLevel::Above, candidate > average, "candidate {}", candidate);
        assert_eq!(level == PriceLevel::Below, candidate < average, "candidate {}", candidate);
    }
}

#[test]
fn test_grand_total_equals_sum_of_subtotals() {
    let prices = [2.0, 0.5, 4.25, 1.75, 3.0, 0.25];
    let catalogs = ["continente", "auchan", "continente", "pingo-doce", "auchan", "continente"];

    let entries: Vec<WatchlistEntry> = prices
        .iter()
        .zip(catalogs.iter())
        .enumerate()
        .map(|(i, (price, catalog))| {
            let product = Product::new("pt", catalog, &i.to_string()).with_price(*price);
            WatchlistEntry::new("pt", catalog, product, (i % 3) as u32)
        })
        .collect();

    let totals = aggregate(&entries);
    let subtotal_sum: f64 = totals.by_catalog.iter().map(|g| g.subtotal).sum();
    let member_count: usize = totals.by_catalog.iter().map(|g| g.entries.len()).sum();

    assert_eq!(totals.grand_total, subtotal_sum);
    assert_eq!(member_count, entries.len());
    assert_eq!(totals.by_catalog.len(), 3);
}

#[test]
fn test_sort_is_a_permutation() {
    let products = vec![
        Product::new("pt", "continente", "a").with_price(3.0).with_price_per_quantity(1.0),
        Product::new("pt", "continente", "b").with_price("??"),
        Product::new("pt", "continente", "c").with_price(1.0).with_price_per_quantity(9.0),
        Product::new("pt", "continente", "d").with_price(1.0).with_price_per_quantity(2.0),
    ];
    let results = vec![CatalogSearchResult::new("pt", "continente", products.clone())];

    for key in [SortKey::Price, SortKey::PricePerUnit] {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = sort_by_price(&results, key, direction);

            let mut before: Vec<&str> = products.iter().map(|p| p.reference.as_str()).collect();
            let mut after: Vec<&str> = sorted[0].products.iter().map(|p| p.reference.as_str()).collect();
            before.sort();
            after.sort();
            assert_eq!(before, after);

            assert_eq!(sort_by_price(&sorted, key, direction), sorted);
        }
    }
}

#[test]
fn test_freshness_one_day_difference() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
    let yesterday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

    let product = Product::new("pt", "continente", "1").with_history(history());
    let entries = vec![WatchlistEntry::new("pt", "continente", product, 1)];

    assert!(is_list_fresh(&entries, today));
    assert!(!is_list_fresh(&entries, yesterday));
    assert!(is_list_fresh(&[], yesterday));
}
