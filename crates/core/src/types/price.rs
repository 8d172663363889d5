//! Type-safe price representation using decimal arithmetic.
//!
//! [`Price::display`] is the currency formatter used by the cart summary:
//! currency symbol, thousands separators and exactly two decimal places,
//! following the conventions of the currency's home market.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
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

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Format for display (e.g., `$1,234.50`, `R$ 1.234,50`).
    ///
    /// Amounts are rounded half away from zero to two decimal places.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let fixed = format!("{:.2}", rounded.abs());
        let (units, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let style = self.currency_code.style();
        let mut out = String::with_capacity(fixed.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(self.currency_code.symbol());
        if style.symbol_spaced {
            out.push(' ');
        }
        out.push_str(&group_thousands(units, style.group_separator));
        out.push(style.decimal_separator);
        out.push_str(cents);
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    BRL,
}

/// Number formatting conventions for a currency.
#[derive(Debug, Clone, Copy)]
struct NumberStyle {
    group_separator: char,
    decimal_separator: char,
    symbol_spaced: bool,
}

impl CurrencyCode {
    /// Currency symbol used as the display prefix.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::CAD => "CA$",
            Self::AUD => "A$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::BRL => "R$",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::BRL => "BRL",
        }
    }

    /// Parse an ISO 4217 code (case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Some(Self::USD),
            "EUR" => Some(Self::EUR),
            "GBP" => Some(Self::GBP),
            "CAD" => Some(Self::CAD),
            "AUD" => Some(Self::AUD),
            "BRL" => Some(Self::BRL),
            _ => None,
        }
    }

    const fn style(self) -> NumberStyle {
        match self {
            Self::BRL => NumberStyle {
                group_separator: '.',
                decimal_separator: ',',
                symbol_spaced: true,
            },
            Self::USD | Self::EUR | Self::GBP | Self::CAD | Self::AUD => NumberStyle {
                group_separator: ',',
                decimal_separator: '.',
                symbol_spaced: false,
            },
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Insert `separator` between every group of three integer digits.
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(amount: Decimal, currency: CurrencyCode) -> String {
        Price::new(amount, currency).display()
    }

    #[test]
    fn test_display_usd() {
        assert_eq!(price(Decimal::new(1999, 2), CurrencyCode::USD), "$19.99");
        assert_eq!(price(Decimal::new(10, 0), CurrencyCode::USD), "$10.00");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(
            price(Decimal::new(123_456_789, 2), CurrencyCode::USD),
            "$1,234,567.89"
        );
        assert_eq!(price(Decimal::new(100_000, 2), CurrencyCode::GBP), "£1,000.00");
        assert_eq!(price(Decimal::new(99_999, 2), CurrencyCode::EUR), "€999.99");
    }

    #[test]
    fn test_display_brl_uses_local_separators() {
        assert_eq!(
            price(Decimal::new(123_450, 2), CurrencyCode::BRL),
            "R$ 1.234,50"
        );
        assert_eq!(price(Decimal::new(10, 0), CurrencyCode::BRL), "R$ 10,00");
        assert_eq!(price(Decimal::ZERO, CurrencyCode::BRL), "R$ 0,00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(price(Decimal::new(10_005, 3), CurrencyCode::USD), "$10.01");
        assert_eq!(price(Decimal::new(10_004, 3), CurrencyCode::USD), "$10.00");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(price(Decimal::new(-550, 2), CurrencyCode::CAD), "-CA$5.50");
        assert_eq!(price(Decimal::new(-1, 3), CurrencyCode::USD), "$0.00");
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(CurrencyCode::from_code("brl"), Some(CurrencyCode::BRL));
        assert_eq!(CurrencyCode::from_code("AUD"), Some(CurrencyCode::AUD));
        assert_eq!(CurrencyCode::from_code("XYZ"), None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1", ','), "1");
        assert_eq!(group_thousands("123", ','), "123");
        assert_eq!(group_thousands("1234", ','), "1,234");
        assert_eq!(group_thousands("123456", '.'), "123.456");
    }
}
