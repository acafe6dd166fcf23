// ⚠️ Error Types - Typed failures surfaced by the engine
// Callers decide the user-visible fallback; the engine never coerces a failure to zero.

use thiserror::Error;

// ============================================================================
// PRICE ERRORS
// ============================================================================

/// Failures of the price analytics core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    /// No numeric value could be recovered from a raw price.
    /// Means "price unknown", never zero.
    #[error("could not parse price from {raw:?}")]
    Parse { raw: String },

    /// Statistics requested over a history with no usable records
    #[error("no price data available")]
    NoData,
}

impl PriceError {
    pub fn parse(raw: impl Into<String>) -> Self {
        PriceError::Parse { raw: raw.into() }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, PriceError::NoData)
    }
}

// ============================================================================
// SEARCH ERRORS
// ============================================================================

/// Caller-side validation of a search trigger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("no catalogs selected")]
    NoCatalogsSelected,
}

// ============================================================================
// CONFIG ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

// ============================================================================
// TESTS
// ============================================================================
