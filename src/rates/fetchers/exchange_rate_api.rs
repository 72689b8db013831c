use crate::{
    constants::REFERENCE_CURRENCY,
    error::RatesError,
    rates::{RateTable, metrics::FetcherMetrics, oracle::RateOracleMessage},
};
use serde::Deserialize;
use std::{collections::HashMap, time::Duration};
use tokio::{sync::mpsc, time::interval};
use tracing::{error, trace, warn};
use url::Url;

/// Response from the `/v4/latest/{base}` endpoint.
#[derive(Debug, Clone, Deserialize)]
struct LatestRates {
    /// The base currency the multipliers are relative to.
    #[serde(default)]
    base: String,
    /// Map of currency code to multiplier.
    rates: HashMap<String, f64>,
}

/// exchangerate-api.com rate fetcher.
#[derive(Debug)]
pub struct ExchangeRateApi {
    /// URL used to fetch rates.
    url: Url,
    /// HTTP client for making requests.
    client: reqwest::Client,
    /// Rate oracle sender used to install updates.
    update_tx: mpsc::UnboundedSender<RateOracleMessage>,
    /// Fetch outcome counters.
    metrics: FetcherMetrics,
}

impl ExchangeRateApi {
    /// Spawns a task that refreshes the rate table on a fixed interval, starting immediately.
    ///
    /// A failed refresh leaves the previously installed table (initially the static fallback) in
    /// place; the failure is logged and counted, never surfaced to quoting.
    pub(crate) fn launch(
        url: Url,
        refresh_interval: Duration,
        update_tx: mpsc::UnboundedSender<RateOracleMessage>,
    ) {
        let fetcher = Self {
            url,
            client: reqwest::Client::new(),
            update_tx,
            metrics: FetcherMetrics::default(),
        };

        tokio::spawn(async move {
            let mut clock = interval(refresh_interval);

            loop {
                clock.tick().await;
                match fetcher.fetch().await {
                    Ok(table) => {
                        fetcher.metrics.refreshes.increment(1);
                        let _ = fetcher.update_tx.send(RateOracleMessage::Update {
                            table,
                            timestamp: std::time::Instant::now(),
                        });
                    }
                    Err(err) => {
                        fetcher.metrics.failures.increment(1);
                        error!(%err, "Failed to refresh exchange rates, keeping the active table.");
                    }
                }
            }
        });
    }

    /// Fetches and validates the latest rate table.
    async fn fetch(&self) -> Result<RateTable, RatesError> {
        let response: LatestRates = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        trace!(base = %response.base, rates = response.rates.len(), "Rate provider response.");

        if !response.base.is_empty() && response.base != REFERENCE_CURRENCY {
            return Err(RatesError::InvalidResponse(format!(
                "expected {REFERENCE_CURRENCY}-based rates, got base {}",
                response.base
            )));
        }

        let mut dropped = 0usize;
        let table: RateTable = response
            .rates
            .into_iter()
            .filter(|(_, rate)| {
                let usable = rate.is_finite() && *rate > 0.0;
                if !usable {
                    dropped += 1;
                }
                usable
            })
            .map(|(code, rate)| (code.to_ascii_uppercase(), rate))
            .collect();
        if dropped > 0 {
            warn!(dropped, "Dropped non-positive rates from provider response.");
        }

        if table.is_empty() {
            return Err(RatesError::InvalidResponse("no usable rates in response".to_string()));
        }

        Ok(table)
    }
}
