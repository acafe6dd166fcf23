// 🔎 Search - Trigger validation and product lookup in result sets
// Fetching is external; this validates what would be sent and reads what came back.

use crate::error::SearchError;
use crate::models::{CatalogSearchResult, Product};
use serde::{Deserialize, Serialize};

/// A catalog the user can pick in the search form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSelection {
    pub locale: String,
    pub catalog: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub selected: bool,
}

/// Catalogs flagged as selected by default
pub fn default_selection(catalogs: &[CatalogSelection]) -> Vec<CatalogSelection> {
    catalogs.iter().filter(|c| c.selected).cloned().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub catalogs: Vec<CatalogSelection>,
}

impl SearchRequest {
    pub fn new(query: &str, catalogs: Vec<CatalogSelection>) -> Self {
        SearchRequest {
            query: query.to_string(),
            catalogs,
        }
    }

    /// Catalogs the search will actually run against
    pub fn selected_catalogs(&self) -> Vec<&CatalogSelection> {
        self.catalogs.iter().filter(|c| c.selected).collect()
    }

    /// Refuse to search with an empty query or no selected catalog
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if !self.catalogs.iter().any(|c| c.selected) {
            return Err(SearchError::NoCatalogsSelected);
        }
        Ok(())
    }
}

/// Find a product in a result set by its identity triple
pub fn find_product<'a>(
    results: &'a [CatalogSearchResult],
    locale: &str,
    catalog: &str,
    reference: &str,
) -> Option<&'a Product> {
    results
        .iter()
        .filter(|r| r.locale == locale && r.catalog == catalog)
        .flat_map(|r| r.products.iter())
        .find(|p| p.reference == reference)
}
