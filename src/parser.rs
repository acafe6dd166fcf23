// 🏗️ Price Parser - Raw feed prices → canonical Money
// Every other engine component reads prices through this module.

use crate::error::PriceError;
use crate::models::{Money, PriceRecord, Product, RawPrice};

// ============================================================================
// PRICE SOURCE TRAIT
// ============================================================================

/// PriceSource - Anything that carries a regular/campaign price pair
///
/// Implemented by `PriceRecord` (history) and `Product` (current price),
/// so effective price and price-per-unit resolve the same way for both.
pub trait PriceSource {
    fn regular_price(&self) -> &RawPrice;

    fn campaign_price(&self) -> Option<&RawPrice>;

    fn price_per_quantity(&self) -> Option<&RawPrice>;
}

impl PriceSource for PriceRecord {
    fn regular_price(&self) -> &RawPrice {
        &self.regular_price
    }

    fn campaign_price(&self) -> Option<&RawPrice> {
        self.campaign_price.as_ref()
    }

    fn price_per_quantity(&self) -> Option<&RawPrice> {
        self.price_per_quantity.as_ref()
    }
}

impl PriceSource for Product {
    fn regular_price(&self) -> &RawPrice {
        &self.regular_price
    }

    fn campaign_price(&self) -> Option<&RawPrice> {
        self.campaign_price.as_ref()
    }

    fn price_per_quantity(&self) -> Option<&RawPrice> {
        self.price_per_quantity.as_ref()
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Convert a raw price into Money
///
/// Numbers pass through when finite and non-negative. Text is stripped of
/// currency symbols and other decoration; the first run of digits and
/// separators is the number.
///
/// Separator rules:
/// - both `.` and `,` present: the last one is the decimal separator
/// - only one kind, appearing once: decimal separator (`1,99`, `2.50`)
/// - only one kind, appearing more than once: thousands separator (`1.000.000`)
/// - only one kind, appearing once before exactly three digits with a non-zero
///   integer part: thousands separator (`1.234 €` is 1234, `0,125` stays 0.125)
/// - apostrophes and non-breaking/thin spaces inside the number are grouping
///
/// A minus sign directly in front of the number is a parse error; prices
/// are never negative.
///
/// # Examples:
/// ```
/// use price_watch::{parse_price, RawPrice};
///
/// assert_eq!(parse_price(&RawPrice::from("1,99 €")).unwrap(), 1.99);
/// assert_eq!(parse_price(&RawPrice::from("€1.234,50")).unwrap(), 1234.5);
/// assert!(parse_price(&RawPrice::from("n/a")).is_err());
/// ```
pub fn parse_price(raw: &RawPrice) -> Result<Money, PriceError> {
    match raw {
        RawPrice::Number(value) => {
            if value.is_finite() && *value >= 0.0 {
                // -0.0 → 0.0
                Ok(value.abs())
            } else {
                Err(PriceError::parse(value.to_string()))
            }
        }
        RawPrice::Text(text) => parse_price_str(text),
    }
}

/// Text variant of `parse_price`
pub fn parse_price_str(raw: &str) -> Result<Money, PriceError> {
    let token = extract_numeric(raw).ok_or_else(|| PriceError::parse(raw))?;
    let normalized = normalize_separators(&token);

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PriceError::parse(raw)),
    }
}

/// First run of digits and separators, grouping characters dropped
fn extract_numeric(raw: &str) -> Option<String> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;

    let mut token = String::new();
    let mut prefix = &raw[..start];

    // ",99" / ".99" → leading zero
    if prefix.ends_with(['.', ',']) {
        token.push('0');
        token.push_str(&raw[start - 1..start]);
        prefix = &raw[..start - 1];
    }

    if prefix.ends_with(['-', '\u{2212}']) {
        return None;
    }

    for c in raw[start..].chars() {
        match c {
            '0'..='9' | '.' | ',' => token.push(c),
            '\'' | '\u{a0}' | '\u{202f}' => continue,
            _ => break,
        }
    }

    let trimmed = token.trim_end_matches(['.', ',']);
    Some(trimmed.to_string())
}

/// Rewrite a digit/separator token into `f64::from_str` syntax
fn normalize_separators(token: &str) -> String {
    let dots = token.matches('.').count();
    let commas = token.matches(',').count();

    let decimal = match (dots, commas) {
        (0, 0) => None,
        (1, 0) | (0, 1) if is_grouped_thousands(token) => None,
        (1, 0) => Some('.'),
        (0, 1) => Some(','),
        (_, 0) | (0, _) => None,
        _ => {
            let last_dot = token.rfind('.');
            let last_comma = token.rfind(',');
            if last_dot > last_comma {
                Some('.')
            } else {
                Some(',')
            }
        }
    };

    token
        .chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(c),
            c if Some(c) == decimal => Some('.'),
            _ => None,
        })
        .collect()
}

/// `1.234` / `1,234`: one separator, exactly three digits after it,
/// and an integer part that is not just zero
fn is_grouped_thousands(token: &str) -> bool {
    match token.split_once(['.', ',']) {
        Some((integer, fraction)) => {
            fraction.len() == 3 && !integer.trim_start_matches('0').is_empty()
        }
        None => false,
    }
}

// ============================================================================
// DERIVED PRICES
// ============================================================================

/// Campaign price when present, otherwise regular price
///
/// A blank campaign field counts as absent.
pub fn effective_price<T: PriceSource + ?Sized>(item: &T) -> Result<Money, PriceError> {
    match item.campaign_price().filter(|campaign| !campaign.is_blank()) {
        Some(campaign) => parse_price(campaign),
        None => parse_price(item.regular_price()),
    }
}

/// Parsed price-per-quantity field; missing counts as unparseable
pub fn price_per_unit<T: PriceSource + ?Sized>(item: &T) -> Result<Money, PriceError> {
    match item.price_per_quantity() {
        Some(raw) => parse_price(raw),
        None => Err(PriceError::parse("")),
    }
}

/// Round to cents, half away from zero. Output boundaries only.
pub fn round_money(value: Money) -> Money {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================
