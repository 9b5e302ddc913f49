//! Currency presentation for catalog prices. The service encodes every price
//! as a dollar string like `"$28.99"`; this module owns the one place that
//! string gets parsed, plus the fixed conversion rates used for display.
//!
//! The rounding asymmetry is inherited from the storefront this mirrors:
//! rupee amounts on book cards are rounded to whole rupees while dollar and
//! euro amounts keep two decimals. Cart totals round to two decimals in every
//! currency.

use thiserror::Error;

/// Rupees per source dollar.
pub const INR_RATE: f64 = 83.0;
/// Euros per source dollar.
pub const EUR_RATE: f64 = 0.93;

/// Ways a source price string can fail to parse. Callers decide whether to
/// surface the failure or fall back to a zero amount; nothing in this module
/// swallows it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price string is empty")]
    Empty,
    #[error("price is not a decimal amount: {0:?}")]
    NotNumeric(String),
}

/// Parse a source-currency price string such as `"$28.99"` into its decimal
/// amount. The dollar prefix is optional so hand-entered test data and the
/// service payload both work.
pub fn parse_usd(price: &str) -> Result<f64, PriceError> {
    let trimmed = price.trim();
    if trimmed.is_empty() {
        return Err(PriceError::Empty);
    }
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    digits
        .parse::<f64>()
        .map_err(|_| PriceError::NotNumeric(price.to_string()))
}

/// Round a computed amount to two decimal places for totals.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// The three display strings shown for every book card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTag {
    pub usd: String,
    pub inr: String,
    pub eur: String,
}

impl PriceTag {
    /// Format a parsed dollar amount in all three display currencies. Whole
    /// rupees, two-decimal dollars and euros.
    pub fn from_amount(usd: f64) -> Self {
        Self {
            usd: format!("${:.2}", usd),
            inr: format!("₹{}", (usd * INR_RATE).round() as i64),
            eur: format!("€{:.2}", usd * EUR_RATE),
        }
    }

    /// Format a raw price string from the catalog. A malformed source renders
    /// as the zero amount in all three currencies, matching what the
    /// storefront displays for unparsable data.
    pub fn from_source(price: &str) -> Self {
        Self::from_amount(parse_usd(price).unwrap_or(0.0))
    }
}

#[cfg(test)]
mod pricing_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_prefixed_and_bare_amounts() {
        assert_eq!(parse_usd("$10.00"), Ok(10.0));
        assert_eq!(parse_usd("28.99"), Ok(28.99));
        assert_eq!(parse_usd(" $5.50 "), Ok(5.5));
    }

    #[test]
    fn rejects_malformed_prices() {
        assert_eq!(parse_usd(""), Err(PriceError::Empty));
        assert_eq!(parse_usd("   "), Err(PriceError::Empty));
        assert_eq!(
            parse_usd("bad"),
            Err(PriceError::NotNumeric("bad".to_string()))
        );
        assert_eq!(
            parse_usd("$12.34extra"),
            Err(PriceError::NotNumeric("$12.34extra".to_string()))
        );
    }

    #[test]
    fn tag_keeps_the_observed_rounding_asymmetry() {
        let tag = PriceTag::from_source("$28.99");
        assert_eq!(tag.usd, "$28.99");
        // 28.99 * 83 = 2406.17, rounded to whole rupees.
        assert_eq!(tag.inr, "₹2406");
        // 28.99 * 0.93 = 26.9607, kept at two decimals.
        assert_eq!(tag.eur, "€26.96");
    }

    #[test]
    fn tag_for_malformed_price_is_the_zero_tag() {
        let tag = PriceTag::from_source("bad");
        assert_eq!(tag.usd, "$0.00");
        assert_eq!(tag.inr, "₹0");
        assert_eq!(tag.eur, "€0.00");
    }

    #[test]
    fn rounds_totals_to_cents() {
        assert_eq!(round_to_cents(830.0), 830.0);
        assert_eq!(round_to_cents(26.9607), 26.96);
        assert_eq!(round_to_cents(26.968), 26.97);
    }
}
