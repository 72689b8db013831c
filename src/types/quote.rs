//! Quote types.

use crate::types::Currency;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// A single line of a quote breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Label shown next to the price, e.g. the package name or `Extra Pages (×2)`.
    pub label: String,
    /// Price in reference-currency units.
    pub amount: u64,
    /// Price formatted in the display currency, or `FREE` for zero-price extras.
    pub display: String,
}

/// A fully computed quote.
///
/// Prices are carried twice: the exact reference-currency total, and the converted total in the
/// display currency. Only the `display_total` is rounded (up, to the nearest whole unit); the
/// stored totals keep full precision for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Client name.
    pub client_name: String,
    /// Business name.
    pub business_name: String,
    /// Contact email.
    pub client_email: String,
    /// Name of the chosen package.
    pub package: String,
    /// Number of additional custom pages.
    pub extra_pages: u32,
    /// Ordered breakdown: package, extra pages (when any), extras in selection order.
    pub line_items: Vec<LineItem>,
    /// Total in reference-currency units, exact.
    pub total: u64,
    /// The display currency.
    pub currency: Currency,
    /// Total converted into the display currency, unrounded.
    pub converted_total: f64,
    /// Converted total formatted for display.
    pub display_total: String,
    /// The time at which this quote expires.
    #[serde(with = "crate::serde::timestamp")]
    pub expires_at: SystemTime,
}

impl Quote {
    /// The package line item. Always the first line.
    pub fn package_item(&self) -> Option<&LineItem> {
        self.line_items.first()
    }

    /// The extra-pages line item, present only when pages were added. Always directly after the
    /// package line.
    pub fn extra_pages_item(&self) -> Option<&LineItem> {
        if self.extra_pages > 0 { self.line_items.get(1) } else { None }
    }

    /// Line items for the selected extras, in selection order.
    pub fn extra_items(&self) -> &[LineItem] {
        let skip = 1 + usize::from(self.extra_pages > 0);
        &self.line_items[skip.min(self.line_items.len())..]
    }
}

/// The result of quote computation.
///
/// An incomplete selection is a normal state while the form is being filled in, not an error:
/// consumers render a placeholder and enable nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum QuoteOutcome {
    /// Not enough input yet: at least one identity field or the package is missing.
    Incomplete,
    /// A fully computed quote.
    Ready(Quote),
}

impl QuoteOutcome {
    /// Returns the computed quote, if any.
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Self::Incomplete => None,
            Self::Ready(quote) => Some(quote),
        }
    }

    /// Whether the selection was incomplete.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn outcome_serializes_with_status_tag() {
        let incomplete = serde_json::to_value(QuoteOutcome::Incomplete).unwrap();
        assert_eq!(incomplete["status"], "incomplete");

        let quote = Quote {
            client_name: "Ada".to_string(),
            business_name: "Engines".to_string(),
            client_email: "ada@example.com".to_string(),
            package: "Basic Package".to_string(),
            extra_pages: 0,
            line_items: vec![LineItem {
                label: "Basic Package".to_string(),
                amount: 95,
                display: "£95".to_string(),
            }],
            total: 95,
            currency: Currency::reference(),
            converted_total: 95.0,
            display_total: "£95".to_string(),
            expires_at: UNIX_EPOCH + Duration::from_secs(1_755_000_000),
        };
        let ready = serde_json::to_value(QuoteOutcome::Ready(quote.clone())).unwrap();
        assert_eq!(ready["status"], "ready");
        assert_eq!(ready["total"], 95);
        assert_eq!(ready["expiresAt"], 1_755_000_000);

        let roundtrip: QuoteOutcome = serde_json::from_value(ready).unwrap();
        assert_eq!(roundtrip.quote(), Some(&quote));
    }
}
