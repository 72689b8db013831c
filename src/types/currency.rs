//! Currency codes and display formatting.

use crate::constants::REFERENCE_CURRENCY;
use serde::{Deserialize, Deserializer, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

/// An ISO-style currency code, normalized to uppercase.
///
/// Any code is accepted: codes without a registered symbol render with the raw code as their
/// prefix, and codes without a known rate convert at identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Returns a normalized currency from the given code.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    /// Returns the reference currency all catalog prices are authored in.
    pub fn reference() -> Self {
        Self(REFERENCE_CURRENCY.to_string())
    }

    /// Whether this is the reference currency.
    pub fn is_reference(&self) -> bool {
        self.0 == REFERENCE_CURRENCY
    }

    /// The currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// The display symbol for this currency.
    ///
    /// Falls back to the raw code when no symbol is registered.
    pub fn symbol(&self) -> &str {
        match self.0.as_str() {
            "GBP" => "£",
            "USD" | "AUD" | "CAD" | "NZD" | "SGD" | "HKD" | "MXN" => "$",
            "EUR" => "€",
            "CHF" => "Fr",
            "JPY" | "CNY" => "¥",
            "INR" => "₹",
            "SEK" | "NOK" | "DKK" => "kr",
            "PLN" => "zł",
            "CZK" => "Kč",
            "ZAR" => "R",
            "BRL" => "R$",
            _ => &self.0,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::reference()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::new(String::deserialize(deserializer)?))
    }
}

/// Formats a converted amount for display: rounded up to the nearest whole unit, grouped with
/// thousand separators, and prefixed with the currency symbol.
///
/// The ceiling is display-only. Stored totals keep the unrounded amount.
pub fn format_amount(amount: f64, currency: &Currency) -> String {
    format!("{}{}", currency.symbol(), group_thousands(amount.ceil() as u64))
}

/// Groups a whole amount with comma thousand separators.
fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_codes() {
        assert_eq!(Currency::new(" usd "), Currency::new("USD"));
        assert_eq!(Currency::new("gbp"), Currency::reference());
        assert!(Currency::new("gbp").is_reference());
        assert!(!Currency::new("USD").is_reference());
    }

    #[test]
    fn symbol_falls_back_to_code() {
        assert_eq!(Currency::new("GBP").symbol(), "£");
        assert_eq!(Currency::new("JPY").symbol(), "¥");
        assert_eq!(Currency::new("XYZ").symbol(), "XYZ");
    }

    #[test]
    fn ceiling_and_separators() {
        let usd = Currency::new("USD");
        assert_eq!(format_amount(279.4, &usd), "$280");
        assert_eq!(format_amount(280.0, &usd), "$280");
        assert_eq!(format_amount(0.0, &usd), "$0");
        assert_eq!(format_amount(18050.0, &Currency::new("JPY")), "¥18,050");
        assert_eq!(format_amount(1_234_567.01, &Currency::new("GBP")), "£1,234,568");
    }

    #[test]
    fn deserialization_normalizes() {
        let currency: Currency = serde_json::from_str(r#""eur""#).unwrap();
        assert_eq!(currency, Currency::new("EUR"));
        assert_eq!(serde_json::to_string(&currency).unwrap(), r#""EUR""#);
    }
}
