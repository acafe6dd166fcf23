// 🛒 Watchlist - Pure add/remove helpers over a watchlist snapshot
//
// Each helper returns a NEW list; the caller's snapshot is never touched.
// Persisting the result (and deleting zero-quantity entries, if wanted)
// is the store's job.

use crate::models::{entry_key, Product, WatchlistEntry};
use tracing::debug;

/// Add one unit of a product
///
/// Existing key → quantity + 1. Otherwise a new entry with quantity 1 is
/// appended. Keys stay unique either way.
pub fn add_product(
    entries: &[WatchlistEntry],
    locale: &str,
    catalog: &str,
    product: &Product,
    history_enabled: bool,
) -> Vec<WatchlistEntry> {
    let key = entry_key(locale, catalog, &product.reference);
    let mut updated = entries.to_vec();

    match updated.iter().position(|entry| entry.key == key) {
        Some(index) => {
            let entry = &mut updated[index];
            entry.quantity = entry.quantity.saturating_add(1);
            debug!(%key, quantity = entry.quantity, "incremented watchlist entry");
        }
        None => {
            debug!(%key, "added watchlist entry");
            updated.push(
                WatchlistEntry::new(locale, catalog, product.clone(), 1)
                    .with_history_enabled(history_enabled),
            );
        }
    }

    updated
}

/// Remove one unit; quantity stops at zero and the entry stays
pub fn remove_one(entries: &[WatchlistEntry], key: &str) -> Vec<WatchlistEntry> {
    entries
        .iter()
        .map(|entry| {
            if entry.key == key {
                WatchlistEntry {
                    quantity: entry.quantity.saturating_sub(1),
                    ..entry.clone()
                }
            } else {
                entry.clone()
            }
        })
        .collect()
}

/// Set an entry's quantity; unknown keys leave the list unchanged
pub fn set_quantity(entries: &[WatchlistEntry], key: &str, quantity: u32) -> Vec<WatchlistEntry> {
    entries
        .iter()
        .map(|entry| {
            if entry.key == key {
                WatchlistEntry {
                    quantity,
                    ..entry.clone()
                }
            } else {
                entry.clone()
            }
        })
        .collect()
}

/// Look up an entry by its identity key
pub fn find_entry<'a>(entries: &'a [WatchlistEntry], key: &str) -> Option<&'a WatchlistEntry> {
    entries.iter().find(|entry| entry.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Product {
        Product::new("pt", "continente", "2210946").with_price("0,89 €")
    }

    #[test]
    fn test_add_new_product() {
        let list = add_product(&[], "pt", "continente", &milk(), true);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].key, "pt.continente.2210946");
        assert_eq!(list[0].quantity, 1);
        assert!(list[0].history_enabled);
    }

    #[test]
    fn test_add_existing_increments() {
        let list = add_product(&[], "pt", "continente", &milk(), true);
        let list = add_product(&list, "pt", "continente", &milk(), true);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].quantity, 2);
    }

    #[test]
    fn test_same_reference_other_catalog_is_distinct() {
        let list = add_product(&[], "pt", "continente", &milk(), true);
        let list = add_product(&list, "pt", "auchan", &milk(), false);

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].key, "pt.auchan.2210946");
        assert!(!list[1].history_enabled);
    }

    #[test]
    fn test_add_does_not_mutate_input() {
        let list = add_product(&[], "pt", "continente", &milk(), true);
        let _ = add_product(&list, "pt", "continente", &milk(), true);

        assert_eq!(list[0].quantity, 1);
    }

    #[test]
    fn test_remove_one_saturates_and_keeps_entry() {
        let list = add_product(&[], "pt", "continente", &milk(), true);

        let list = remove_one(&list, "pt.continente.2210946");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].quantity, 0);

        let list = remove_one(&list, "pt.continente.2210946");
        assert_eq!(list[0].quantity, 0);
    }

    #[test]
    fn test_set_quantity_and_find() {
        let list = add_product(&[], "pt", "continente", &milk(), true);
        let list = set_quantity(&list, "pt.continente.2210946", 6);

        assert_eq!(find_entry(&list, "pt.continente.2210946").map(|e| e.quantity), Some(6));
        assert!(find_entry(&list, "pt.auchan.1").is_none());

        let unchanged = set_quantity(&list, "pt.auchan.1", 3);
        assert_eq!(unchanged, list);
    }
}
