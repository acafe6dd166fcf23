// 🚦 Price Indicator - Is the current price below, at or above its own history?

use crate::error::PriceError;
use crate::models::{Money, PriceRecord, RawPrice};
use crate::parser::parse_price;
use crate::statistics::average_price;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceLevel {
    Below,
    At,
    Above,
}

impl PriceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceLevel::Below => "BELOW",
            PriceLevel::At => "AT",
            PriceLevel::Above => "ABOVE",
        }
    }
}

/// Classify a candidate price against the unrounded historical average
///
/// `At` only on exact float equality. A mean and a freshly parsed price
/// rarely match exactly; that is the established behavior and stays.
pub fn classify(records: &[PriceRecord], candidate: Money) -> Result<PriceLevel, PriceError> {
    let average = average_price(records)?;

    let level = if candidate == average {
        PriceLevel::At
    } else if candidate > average {
        PriceLevel::Above
    } else {
        PriceLevel::Below
    };

    debug!(candidate, average, level = level.as_str(), "classified price");
    Ok(level)
}

/// `classify` for a price straight from the feed
pub fn classify_raw(records: &[PriceRecord], candidate: &RawPrice) -> Result<PriceLevel, PriceError> {
    let candidate = parse_price(candidate)?;
    classify(records, candidate)
}
