//! Decimal money helpers.
//!
//! Monetary values travel through the core as plain [`Decimal`] with cent
//! precision. [`Price`] only exists for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pre-discount price of a cart or order line.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// A US dollar amount, used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    /// Amount in dollars, not cents.
    pub amount: Decimal,
}

impl Price {
    /// Create a price in US dollars.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self { amount }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = self.amount.round_dp(2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{sign}${:.2}", rounded.abs())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(dec!(25), 2), dec!(50));
        assert_eq!(line_total(dec!(4.75), 3), dec!(14.25));
        assert_eq!(line_total(dec!(19.99), 0), Decimal::ZERO);
    }

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::usd(dec!(192)).to_string(), "$192.00");
        assert_eq!(Price::usd(dec!(43.5)).to_string(), "$43.50");
        assert_eq!(Price::usd(dec!(8.125)).to_string(), "$8.12");
    }

    #[test]
    fn test_serializes_as_bare_dollar_amount() {
        let json = serde_json::to_string(&Price::usd(dec!(12.50))).unwrap();
        assert_eq!(json, "\"12.50\"");
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Price::usd(dec!(12.50)));
    }

    #[test]
    fn test_display_negative_amount() {
        assert_eq!(Price::usd(dec!(-5)).to_string(), "-$5.00");
    }
}
