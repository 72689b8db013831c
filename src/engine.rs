//! Quote computation.
//!
//! [`compute`] is the pure core: selection + catalog + rate table in, [`QuoteOutcome`] out.
//! [`QuoteEngine`] wraps it with the live [`RateOracle`] and assembles the export payloads.

use crate::{
    config::{QuoteConfig, StudioConfig},
    error::QuoteError,
    rates::{RateOracle, RateTable},
    types::{
        ContactDraft, Currency, DocumentLine, FREE_LABEL, LineItem, NEXT_STEPS, PackageCatalog,
        PricedCatalog, Quote, QuoteDocument, QuoteOutcome, Selection, format_amount, long_date,
        quote_number,
    },
};
use std::time::SystemTime;
use tracing::instrument;

/// Computes a quote for the given selection against a fixed rate table.
///
/// An incomplete selection (missing identity field or package) yields
/// [`QuoteOutcome::Incomplete`]; a selection referencing names the catalog does not carry is an
/// error. The breakdown is emitted in fixed order: package, extra pages (only when the count is
/// positive), then extras in selection order.
pub fn compute(
    selection: &Selection,
    catalog: &PackageCatalog,
    config: &QuoteConfig,
    rates: &RateTable,
    currency: &Currency,
    now: SystemTime,
) -> Result<QuoteOutcome, QuoteError> {
    let package = match selection.package.as_deref().filter(|_| selection.is_complete()) {
        Some(name) => {
            catalog.package(name).ok_or_else(|| QuoteError::UnknownPackage(name.to_string()))?
        }
        None => return Ok(QuoteOutcome::Incomplete),
    };

    let mut total = package.price;
    let mut line_items = vec![LineItem {
        label: package.name.clone(),
        amount: package.price,
        display: rates.display_price(package.price, currency),
    }];

    if selection.extra_pages > 0 {
        let amount = u64::from(selection.extra_pages) * config.page_rate;
        total += amount;
        line_items.push(LineItem {
            label: format!("Extra Pages (×{})", selection.extra_pages),
            amount,
            display: rates.display_price(amount, currency),
        });
    }

    // Selection extras are unique by name; drop duplicates from hand-built input.
    let mut seen: Vec<&str> = Vec::with_capacity(selection.extras.len());
    for name in &selection.extras {
        if seen.contains(&name.as_str()) {
            continue;
        }
        seen.push(name);

        let extra =
            catalog.extra(name).ok_or_else(|| QuoteError::UnknownExtra(name.clone()))?;
        total += extra.price;
        line_items.push(LineItem {
            label: extra.name.clone(),
            amount: extra.price,
            display: if extra.price == 0 {
                FREE_LABEL.to_string()
            } else {
                rates.display_price(extra.price, currency)
            },
        });
    }

    let converted_total = rates.convert(total, currency);

    Ok(QuoteOutcome::Ready(Quote {
        client_name: selection.client_name.trim().to_string(),
        business_name: selection.business_name.trim().to_string(),
        client_email: selection.client_email.trim().to_string(),
        package: package.name.clone(),
        extra_pages: selection.extra_pages,
        line_items,
        total,
        currency: currency.clone(),
        converted_total,
        display_total: format_amount(converted_total, currency),
        expires_at: now + config.validity(),
    }))
}

/// The quote engine: the catalog, the pricing configuration and the rate oracle.
#[derive(Debug)]
pub struct QuoteEngine {
    /// The package catalog.
    catalog: PackageCatalog,
    /// Quote computation configuration.
    quote: QuoteConfig,
    /// Studio identity for exported documents.
    studio: StudioConfig,
    /// The rate oracle.
    rates: RateOracle,
}

impl QuoteEngine {
    /// Returns a new [`QuoteEngine`].
    pub fn new(
        catalog: PackageCatalog,
        quote: QuoteConfig,
        studio: StudioConfig,
        rates: RateOracle,
    ) -> Self {
        Self { catalog, quote, studio, rates }
    }

    /// The rate oracle backing this engine.
    pub fn rates(&self) -> &RateOracle {
        &self.rates
    }

    /// The package catalog.
    pub fn catalog(&self) -> &PackageCatalog {
        &self.catalog
    }

    /// Computes a quote for the given selection using the active rate table.
    #[instrument(skip_all)]
    pub async fn build_quote(
        &self,
        selection: &Selection,
        currency: &Currency,
    ) -> Result<QuoteOutcome, QuoteError> {
        let snapshot = self.rates.snapshot().await;
        compute(selection, &self.catalog, &self.quote, &snapshot.table, currency, SystemTime::now())
    }

    /// Returns the catalog with every price formatted in the given display currency.
    pub async fn priced_catalog(&self, currency: &Currency) -> PricedCatalog {
        let snapshot = self.rates.snapshot().await;
        self.catalog.priced(&snapshot.table, currency)
    }

    /// Assembles the document payload for the exporter.
    ///
    /// Unlike [`Self::build_quote`], an incomplete selection is an error here: there is nothing
    /// to export.
    #[instrument(skip_all)]
    pub async fn document(
        &self,
        selection: &Selection,
        currency: &Currency,
    ) -> Result<QuoteDocument, QuoteError> {
        match self.build_quote(selection, currency).await? {
            QuoteOutcome::Ready(quote) => Ok(self.assemble_document(&quote)),
            QuoteOutcome::Incomplete => Err(QuoteError::IncompleteSelection),
        }
    }

    /// Assembles a prefilled contact-form draft summarizing the quote.
    pub async fn contact_draft(
        &self,
        selection: &Selection,
        currency: &Currency,
    ) -> Result<ContactDraft, QuoteError> {
        match self.build_quote(selection, currency).await? {
            QuoteOutcome::Ready(quote) => Ok(assemble_contact(&quote)),
            QuoteOutcome::Incomplete => Err(QuoteError::IncompleteSelection),
        }
    }

    fn assemble_document(&self, quote: &Quote) -> QuoteDocument {
        let issued_at = SystemTime::now();

        let mut lines = Vec::with_capacity(quote.line_items.len());
        if let Some(item) = quote.package_item() {
            lines.push(DocumentLine {
                title: item.label.clone(),
                price: item.display.clone(),
                details: self
                    .catalog
                    .package(&quote.package)
                    .map(|p| p.features.clone())
                    .unwrap_or_default(),
            });
        }
        if let Some(item) = quote.extra_pages_item() {
            lines.push(DocumentLine {
                title: item.label.clone(),
                price: item.display.clone(),
                details: vec!["Additional custom pages".to_string()],
            });
        }
        for item in quote.extra_items() {
            lines.push(DocumentLine {
                title: item.label.clone(),
                price: item.display.clone(),
                details: Vec::new(),
            });
        }

        let conversion_note = (!quote.currency.is_reference()).then(|| {
            format!(
                "Converted from {}{:.2} GBP at current exchange rate",
                Currency::reference().symbol(),
                quote.total as f64
            )
        });

        QuoteDocument {
            quote_number: quote_number(&self.quote.number_prefix, issued_at),
            issued_on: long_date(issued_at),
            prepared_for: quote.client_name.clone(),
            business: quote.business_name.clone(),
            email: quote.client_email.clone(),
            lines,
            total: quote.display_total.clone(),
            conversion_note,
            valid_until: long_date(quote.expires_at),
            next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
            contact: format!("Contact: {}", self.studio.contact_email),
        }
    }
}

/// Builds the contact-form message body summarizing a quote.
///
/// All amounts are quoted in the reference currency; the total keeps two decimal places and no
/// display rounding.
fn assemble_contact(quote: &Quote) -> ContactDraft {
    let reference = Currency::reference();
    let symbol = reference.symbol();
    let mut message = String::from("Hi, I've generated a quote using your quote builder.\n\n");

    if let Some(item) = quote.package_item() {
        message.push_str(&format!("Package: {} ({symbol}{})\n", item.label, item.amount));
    }
    if let Some(item) = quote.extra_pages_item() {
        message.push_str(&format!(
            "Extra Pages: {} ({symbol}{})\n",
            quote.extra_pages, item.amount
        ));
    }

    let extras = quote.extra_items();
    if !extras.is_empty() {
        message.push_str("\nOptional Extras:\n");
        for item in extras {
            let price = if item.amount == 0 {
                FREE_LABEL.to_string()
            } else {
                format!("{symbol}{}", item.amount)
            };
            message.push_str(&format!("- {} ({price})\n", item.label));
        }
    }

    message.push_str(&format!("\nTotal: {symbol}{:.2}\n\n", quote.total as f64));
    message.push_str("My quote PDF is attached. Looking forward to working together!");

    ContactDraft {
        name: quote.client_name.clone(),
        business: quote.business_name.clone(),
        email: quote.client_email.clone(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SelectionUpdate;
    use std::time::Duration;

    fn selection() -> Selection {
        Selection::default()
            .apply(SelectionUpdate::ClientName("Ada Lovelace".to_string()))
            .apply(SelectionUpdate::BusinessName("Analytical Engines".to_string()))
            .apply(SelectionUpdate::ClientEmail("ada@example.com".to_string()))
            .apply(SelectionUpdate::Package(Some("Standard Package".to_string())))
            .apply(SelectionUpdate::ExtraPages(2))
            .apply(SelectionUpdate::ToggleExtra("Logo Refresh".to_string()))
    }

    fn compute_now(
        selection: &Selection,
        currency: &Currency,
    ) -> Result<QuoteOutcome, QuoteError> {
        compute(
            selection,
            &PackageCatalog::default(),
            &QuoteConfig::default(),
            &RateTable::fallback(),
            currency,
            SystemTime::now(),
        )
    }

    #[test]
    fn standard_package_in_usd() {
        let quote = match compute_now(&selection(), &Currency::new("USD")).unwrap() {
            QuoteOutcome::Ready(quote) => quote,
            QuoteOutcome::Incomplete => panic!("expected a quote"),
        };

        // 160 + 2 * 30 + 0
        assert_eq!(quote.total, 220);
        assert!((quote.converted_total - 279.4).abs() < 1e-9);
        assert_eq!(quote.display_total, "$280");

        let labels: Vec<_> = quote.line_items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["Standard Package", "Extra Pages (×2)", "Logo Refresh"]);
        assert_eq!(quote.line_items[1].amount, 60);
        assert_eq!(quote.line_items[2].display, "FREE");
    }

    #[test]
    fn incomplete_when_any_identity_field_is_missing() {
        let complete = selection();

        for strip in [
            SelectionUpdate::ClientName(String::new()),
            SelectionUpdate::BusinessName("  ".to_string()),
            SelectionUpdate::ClientEmail(String::new()),
            SelectionUpdate::Package(None),
        ] {
            let outcome = compute_now(&complete.apply(strip), &Currency::reference()).unwrap();
            assert!(outcome.is_incomplete());
        }
    }

    #[test]
    fn incomplete_even_with_extras_populated() {
        let selection = Selection {
            extras: vec!["Blog Setup".to_string()],
            extra_pages: 4,
            ..Default::default()
        };
        assert!(compute_now(&selection, &Currency::reference()).unwrap().is_incomplete());
    }

    #[test]
    fn no_pages_line_for_zero_count() {
        let selection = selection().apply(SelectionUpdate::ExtraPages(0));
        let quote = match compute_now(&selection, &Currency::reference()).unwrap() {
            QuoteOutcome::Ready(quote) => quote,
            QuoteOutcome::Incomplete => panic!("expected a quote"),
        };
        assert_eq!(quote.total, 160);
        assert!(quote.line_items.iter().all(|i| !i.label.starts_with("Extra Pages")));
        assert!(quote.extra_pages_item().is_none());
    }

    #[test]
    fn unknown_names_are_errors_not_incomplete() {
        let unknown_package =
            selection().apply(SelectionUpdate::Package(Some("Mystery Package".to_string())));
        assert!(matches!(
            compute_now(&unknown_package, &Currency::reference()),
            Err(QuoteError::UnknownPackage(name)) if name == "Mystery Package"
        ));

        let unknown_extra = selection().apply(SelectionUpdate::ToggleExtra("Jetpack".to_string()));
        assert!(matches!(
            compute_now(&unknown_extra, &Currency::reference()),
            Err(QuoteError::UnknownExtra(name)) if name == "Jetpack"
        ));
    }

    #[test]
    fn duplicate_extras_counted_once() {
        let mut selection = selection();
        selection.extras = vec!["Blog Setup".to_string(), "Blog Setup".to_string()];
        let quote = match compute_now(&selection, &Currency::reference()).unwrap() {
            QuoteOutcome::Ready(quote) => quote,
            QuoteOutcome::Incomplete => panic!("expected a quote"),
        };
        assert_eq!(quote.total, 160 + 60 + 80);
        assert_eq!(quote.extra_items().len(), 1);
    }

    #[test]
    fn expiry_tracks_computation_time() {
        let now = SystemTime::now();
        let outcome = compute(
            &selection(),
            &PackageCatalog::default(),
            &QuoteConfig::default(),
            &RateTable::fallback(),
            &Currency::reference(),
            now,
        )
        .unwrap();
        let quote = outcome.quote().unwrap().clone();
        assert_eq!(quote.expires_at, now + Duration::from_secs(14 * 86_400));
    }

    #[test]
    fn repeated_computation_is_stable() {
        let now = SystemTime::now();
        let run = || {
            compute(
                &selection(),
                &PackageCatalog::default(),
                &QuoteConfig::default(),
                &RateTable::fallback(),
                &Currency::new("EUR"),
                now,
            )
            .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[tokio::test]
    async fn document_carries_features_and_conversion_note() {
        let engine = QuoteEngine::new(
            PackageCatalog::default(),
            QuoteConfig::default(),
            StudioConfig::default(),
            RateOracle::new(),
        );

        let document = engine.document(&selection(), &Currency::new("USD")).await.unwrap();
        assert!(document.quote_number.starts_with("LD-"));
        assert_eq!(document.prepared_for, "Ada Lovelace");
        assert_eq!(document.lines[0].details.len(), 6);
        assert_eq!(document.lines[1].details, ["Additional custom pages"]);
        assert_eq!(document.lines[2].price, "FREE");
        assert_eq!(document.total, "$280");
        assert_eq!(
            document.conversion_note.as_deref(),
            Some("Converted from £220.00 GBP at current exchange rate")
        );
        assert_eq!(document.contact, "Contact: hello@liamdesigns.dev");

        // No conversion note in the reference currency.
        let document = engine.document(&selection(), &Currency::reference()).await.unwrap();
        assert!(document.conversion_note.is_none());
        assert_eq!(document.total, "£220");
    }

    #[tokio::test]
    async fn contact_draft_message() {
        let engine = QuoteEngine::new(
            PackageCatalog::default(),
            QuoteConfig::default(),
            StudioConfig::default(),
            RateOracle::new(),
        );

        let draft = engine.contact_draft(&selection(), &Currency::new("USD")).await.unwrap();
        assert_eq!(draft.name, "Ada Lovelace");
        assert_eq!(
            draft.message,
            "Hi, I've generated a quote using your quote builder.\n\n\
             Package: Standard Package (£160)\n\
             Extra Pages: 2 (£60)\n\n\
             Optional Extras:\n\
             - Logo Refresh (FREE)\n\n\
             Total: £220.00\n\n\
             My quote PDF is attached. Looking forward to working together!"
        );
    }

    #[tokio::test]
    async fn export_of_incomplete_selection_is_an_error() {
        let engine = QuoteEngine::new(
            PackageCatalog::default(),
            QuoteConfig::default(),
            StudioConfig::default(),
            RateOracle::new(),
        );

        let incomplete = selection().apply(SelectionUpdate::Package(None));
        assert!(matches!(
            engine.document(&incomplete, &Currency::reference()).await,
            Err(QuoteError::IncompleteSelection)
        ));
        assert!(matches!(
            engine.contact_draft(&incomplete, &Currency::reference()).await,
            Err(QuoteError::IncompleteSelection)
        ));
    }
}
