//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront sells in Indian rupees, so display formatting follows the
//! `en-IN` convention: the last three integer digits form one group and the
//! remaining digits are grouped in pairs (`₹12,34,567.50`).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a rupee price.
    #[must_use]
    pub const fn inr(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::INR)
    }

    /// Format for display, e.g. `₹1,234.50`.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let text = format!("{:.2}", rounded.abs());
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let grouped = match self.currency_code {
            CurrencyCode::INR => group_indian(whole),
            _ => group_thousands(whole),
        };
        format!(
            "{sign}{}{grouped}.{fraction}",
            self.currency_code.symbol()
        )
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol used as a display prefix.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut rest, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while rest.len() > 2 {
        let (head, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = head;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

fn group_thousands(digits: &str) -> String {
    let mut groups = Vec::new();
    let mut rest = digits;
    while rest.len() > 3 {
        let (head, triple) = rest.split_at(rest.len() - 3);
        groups.push(triple);
        rest = head;
    }
    groups.push(rest);
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inr_display_small_amounts() {
        assert_eq!(Price::inr(Decimal::new(0, 0)).display(), "₹0.00");
        assert_eq!(Price::inr(Decimal::new(999, 0)).display(), "₹999.00");
        assert_eq!(Price::inr(Decimal::new(12345, 1)).display(), "₹1,234.50");
    }

    #[test]
    fn test_inr_display_uses_lakh_grouping() {
        assert_eq!(
            Price::inr(Decimal::new(123_456_750, 2)).display(),
            "₹12,34,567.50"
        );
        assert_eq!(
            Price::inr(Decimal::new(1_000_000_000, 0)).display(),
            "₹1,00,00,00,000.00"
        );
    }

    #[test]
    fn test_display_rounds_to_two_places() {
        assert_eq!(Price::inr(Decimal::new(10_005, 3)).display(), "₹10.01");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(Price::inr(Decimal::new(-150_000, 2)).display(), "-₹1,500.00");
    }

    #[test]
    fn test_other_currencies_group_by_thousands() {
        let price = Price::new(Decimal::new(123_456_700, 2), CurrencyCode::USD);
        assert_eq!(price.display(), "$1,234,567.00");
    }
}
