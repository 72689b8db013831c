//! Export payloads: the quote document handed to the PDF renderer, and the prefilled contact
//! draft handed to the form-submission collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// The fixed next-steps section printed at the bottom of every quote document.
pub const NEXT_STEPS: [&str; 3] = [
    "Review this quote carefully",
    "Reply with any questions or to confirm",
    "Once confirmed, I'll begin your project",
];

/// One line of an exported quote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLine {
    /// Line title: package name, `Extra Pages (×N)`, or extra name.
    pub title: String,
    /// Price formatted in the display currency, or `FREE`.
    pub price: String,
    /// Detail rows under the title: the package's feature list, or a short note for extra pages.
    pub details: Vec<String>,
}

/// Everything the document exporter needs to render a quote.
///
/// The exporter itself is an external collaborator; this payload is the full contract with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDocument {
    /// Quote number, e.g. `LD-20260807-4821`.
    pub quote_number: String,
    /// Issue date in en-GB long form, e.g. `7 August 2026`.
    pub issued_on: String,
    /// Client name.
    pub prepared_for: String,
    /// Business name.
    pub business: String,
    /// Contact email.
    pub email: String,
    /// Ordered document lines.
    pub lines: Vec<DocumentLine>,
    /// Total formatted in the display currency.
    pub total: String,
    /// Present when the display currency differs from the reference currency, e.g.
    /// `Converted from £220.00 GBP at current exchange rate`.
    pub conversion_note: Option<String>,
    /// Expiry date in en-GB long form.
    pub valid_until: String,
    /// Fixed next-steps section.
    pub next_steps: Vec<String>,
    /// Studio contact email.
    pub contact: String,
}

/// A prefilled contact-form draft summarizing a quote.
///
/// The engine only assembles the draft; submission is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    /// Client name.
    pub name: String,
    /// Business name.
    pub business: String,
    /// Contact email.
    pub email: String,
    /// Prefilled message body.
    pub message: String,
}

/// Builds a quote number from the issue time: prefix, date, and a short disambiguating suffix
/// taken from the millisecond clock.
pub fn quote_number(prefix: &str, issued_at: SystemTime) -> String {
    let date: DateTime<Utc> = issued_at.into();
    let millis = issued_at.duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
    format!("{prefix}-{}-{:04}", date.format("%Y%m%d"), millis % 10_000)
}

/// Formats a timestamp as an en-GB long date, e.g. `7 August 2026`.
pub fn long_date(at: SystemTime) -> String {
    let date: DateTime<Utc> = at.into();
    date.format("%-d %B %Y").to_string()
}
