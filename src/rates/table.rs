//! The exchange-rate table.

use crate::types::{Currency, format_amount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Approximate GBP multipliers used when the rate provider cannot be reached.
const FALLBACK_RATES: [(&str, f64); 20] = [
    ("GBP", 1.0),
    ("USD", 1.27),
    ("EUR", 1.17),
    ("AUD", 1.95),
    ("CAD", 1.75),
    ("NZD", 2.10),
    ("CHF", 1.12),
    ("JPY", 190.0),
    ("CNY", 9.10),
    ("INR", 106.0),
    ("SGD", 1.70),
    ("HKD", 9.90),
    ("SEK", 13.50),
    ("NOK", 13.80),
    ("DKK", 8.70),
    ("PLN", 5.10),
    ("CZK", 29.50),
    ("ZAR", 23.00),
    ("BRL", 7.30),
    ("MXN", 25.50),
];

/// A mapping from currency code to its multiplier relative to the reference currency.
///
/// Lookups never fail: the reference currency converts at exactly 1 without touching the table,
/// and unknown codes default to 1 as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(HashMap<String, f64>);

impl RateTable {
    /// Returns a table over the given rates.
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self(rates)
    }

    /// Returns the built-in static fallback table.
    pub fn fallback() -> Self {
        Self(FALLBACK_RATES.iter().map(|(code, rate)| (code.to_string(), *rate)).collect())
    }

    /// The multiplier from the reference currency to the given currency.
    ///
    /// Exactly 1 for the reference currency, bypassing the table so a stored `1.0` can never
    /// drift through float arithmetic. Unknown codes also convert at identity.
    pub fn rate(&self, currency: &Currency) -> f64 {
        if currency.is_reference() {
            return 1.0;
        }
        self.0.get(currency.code()).copied().unwrap_or(1.0)
    }

    /// Converts a reference-currency amount into the given currency, unrounded.
    pub fn convert(&self, amount: u64, currency: &Currency) -> f64 {
        if currency.is_reference() {
            return amount as f64;
        }
        amount as f64 * self.rate(currency)
    }

    /// Converts a reference-currency amount and formats it for display.
    pub fn display_price(&self, amount: u64, currency: &Currency) -> String {
        format_amount(self.convert(amount, currency), currency)
    }

    /// Iterates over the table entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table carries no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::fallback()
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
