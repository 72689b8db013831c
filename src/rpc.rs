//! # Quoter RPC
//!
//! Implementation of the `quote_` namespace the studio site talks to.
//!
//! - `quote_build` computes a live breakdown for the current selection. Incomplete selections are
//!   a normal response, not an error, so the page can render its placeholder state.
//! - `quote_document` and `quote_contactDraft` assemble the export payloads for the PDF renderer
//!   and the contact form. Both require a complete selection.
//! - `quote_packages` and `quote_currencies` serve the catalog and the active rate table for the
//!   price displays.

use crate::{
    engine::QuoteEngine,
    error::QuoterError,
    types::{
        ContactDraft, Currency, PricedCatalog, QuoteDocument, QuoteOutcome, Selection,
    },
};
use jsonrpsee::{
    core::{RpcResult, async_trait},
    proc_macros::rpc,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A currency the service can display prices in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInfo {
    /// The currency code.
    pub code: Currency,
    /// The display symbol.
    pub symbol: String,
    /// Multiplier from the reference currency.
    pub rate: f64,
}

/// The active rate table as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrenciesResponse {
    /// The reference currency all catalog prices are authored in.
    pub reference: Currency,
    /// Whether the served table came from the rate provider. `false` means the built-in fallback
    /// or a pinned table is in use.
    pub live: bool,
    /// Supported currencies, sorted by code.
    pub currencies: Vec<CurrencyInfo>,
}

/// Quoter `quote_` RPC namespace.
#[rpc(server, client, namespace = "quote")]
pub trait QuoteApi {
    /// Returns `ok`. Proxied from `GET /health`.
    #[method(name = "health", aliases = ["health"])]
    async fn health(&self) -> RpcResult<String>;

    /// Get the active rate table and its provenance.
    #[method(name = "currencies")]
    async fn currencies(&self) -> RpcResult<CurrenciesResponse>;

    /// Get the package catalog with prices formatted in the given display currency.
    ///
    /// Defaults to the reference currency.
    #[method(name = "packages")]
    async fn packages(&self, currency: Option<Currency>) -> RpcResult<PricedCatalog>;

    /// Compute a quote for the given selection.
    ///
    /// Returns an incomplete outcome while identity fields or the package are missing.
    #[method(name = "build")]
    async fn build(
        &self,
        selection: Selection,
        currency: Option<Currency>,
    ) -> RpcResult<QuoteOutcome>;

    /// Assemble the document payload for the PDF exporter.
    #[method(name = "document")]
    async fn document(
        &self,
        selection: Selection,
        currency: Option<Currency>,
    ) -> RpcResult<QuoteDocument>;

    /// Assemble a prefilled contact-form draft summarizing the quote.
    #[method(name = "contactDraft")]
    async fn contact_draft(
        &self,
        selection: Selection,
        currency: Option<Currency>,
    ) -> RpcResult<ContactDraft>;
}

/// Implementation of the `quote_` namespace over a [`QuoteEngine`].
#[derive(Debug, Clone)]
pub struct Quoter {
    /// The engine.
    engine: Arc<QuoteEngine>,
}

impl Quoter {
    /// Returns a new [`Quoter`].
    pub fn new(engine: QuoteEngine) -> Self {
        Self { engine: Arc::new(engine) }
    }
}

#[async_trait]
impl QuoteApiServer for Quoter {
    async fn health(&self) -> RpcResult<String> {
        Ok("ok".to_string())
    }

    async fn currencies(&self) -> RpcResult<CurrenciesResponse> {
        let snapshot = self.engine.rates().snapshot().await;

        let mut currencies: Vec<_> = snapshot
            .table
            .iter()
            .map(|(code, rate)| {
                let code = Currency::new(code);
                CurrencyInfo { symbol: code.symbol().to_string(), code, rate }
            })
            .collect();
        currencies.sort_by(|a, b| a.code.code().cmp(b.code.code()));

        Ok(CurrenciesResponse {
            reference: Currency::reference(),
            live: snapshot.live,
            currencies,
        })
    }

    async fn packages(&self, currency: Option<Currency>) -> RpcResult<PricedCatalog> {
        Ok(self.engine.priced_catalog(&currency.unwrap_or_default()).await)
    }

    async fn build(
        &self,
        selection: Selection,
        currency: Option<Currency>,
    ) -> RpcResult<QuoteOutcome> {
        Ok(self
            .engine
            .build_quote(&selection, &currency.unwrap_or_default())
            .await
            .map_err(QuoterError::from)?)
    }

    async fn document(
        &self,
        selection: Selection,
        currency: Option<Currency>,
    ) -> RpcResult<QuoteDocument> {
        Ok(self
            .engine
            .document(&selection, &currency.unwrap_or_default())
            .await
            .map_err(QuoterError::from)?)
    }

    async fn contact_draft(
        &self,
        selection: Selection,
        currency: Option<Currency>,
    ) -> RpcResult<ContactDraft> {
        Ok(self
            .engine
            .contact_draft(&selection, &currency.unwrap_or_default())
            .await
            .map_err(QuoterError::from)?)
    }
}
