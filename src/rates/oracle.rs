//! The rate oracle task.

use crate::{
    rates::{RateFetcher, RateTable, fetchers::ExchangeRateApi, metrics::CurrencyRateMetrics},
    types::Currency,
};
use std::{collections::HashMap, time::Instant};
use tokio::sync::{mpsc, oneshot};
use tracing::trace;
use url::Url;

/// Messages used by the rate oracle task.
#[derive(Debug)]
pub enum RateOracleMessage {
    /// Message to replace the active rate table.
    Update {
        /// The new table.
        table: RateTable,
        /// When the table was obtained.
        timestamp: Instant,
    },
    /// Message to look up the multiplier for a currency.
    Rate {
        /// The currency to look up.
        currency: Currency,
        /// Reply channel.
        tx: oneshot::Sender<f64>,
    },
    /// Message to snapshot the active table.
    Snapshot {
        /// Reply channel.
        tx: oneshot::Sender<RatesSnapshot>,
    },
}

/// The active rate table together with its provenance.
#[derive(Debug, Clone)]
pub struct RatesSnapshot {
    /// The active table.
    pub table: RateTable,
    /// Whether the table came from the rate provider. `false` means the built-in fallback or a
    /// pinned table is being served.
    pub live: bool,
}

/// An oracle serving the multiplier from the reference currency to any display currency.
///
/// The oracle is available from the moment it is constructed: it starts on the static fallback
/// table and swaps a live table in silently whenever a fetch succeeds, so a slow or failing rate
/// provider never blocks quoting.
#[derive(Debug, Clone)]
pub struct RateOracle {
    /// Channel sender to look up rates and install updates.
    tx: mpsc::UnboundedSender<RateOracleMessage>,
}

impl Default for RateOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl RateOracle {
    /// Returns a new [`RateOracle`] serving the static fallback table until an update arrives.
    pub fn new() -> Self {
        Self::with_table(RateTable::fallback())
    }

    /// Returns a new [`RateOracle`] serving the given table until an update arrives.
    pub fn with_table(table: RateTable) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut registry = RateRegistry::new(table);
            while let Some(message) = rx.recv().await {
                match message {
                    RateOracleMessage::Update { table, timestamp } => {
                        trace!(?timestamp, rates = table.len(), "Received rate table update.");
                        registry.install(table);
                    }
                    RateOracleMessage::Rate { currency, tx } => {
                        trace!(%currency, "Received rate lookup request.");
                        let _ = tx.send(registry.table.rate(&currency));
                    }
                    RateOracleMessage::Snapshot { tx } => {
                        let _ = tx.send(RatesSnapshot {
                            table: registry.table.clone(),
                            live: registry.live,
                        });
                    }
                }
            }
        });

        Self { tx }
    }

    /// Spawns a fetcher that keeps the oracle updated from an external provider.
    pub fn spawn_fetcher(
        &self,
        fetcher: RateFetcher,
        url: Url,
        refresh_interval: std::time::Duration,
    ) {
        match fetcher {
            RateFetcher::ExchangeRateApi => {
                ExchangeRateApi::launch(url, refresh_interval, self.tx.clone())
            }
        }
    }

    /// Replaces the active rate table.
    pub fn set_rates(&self, table: RateTable) {
        let _ = self.tx.send(RateOracleMessage::Update { table, timestamp: Instant::now() });
    }

    /// Returns the multiplier from the reference currency to the given currency.
    ///
    /// The reference currency converts at exactly 1 without a table lookup; unknown codes also
    /// convert at identity.
    pub async fn rate(&self, currency: &Currency) -> f64 {
        if currency.is_reference() {
            return 1.0;
        }

        let (req_tx, req_rx) = oneshot::channel();
        let _ = self.tx.send(RateOracleMessage::Rate { currency: currency.clone(), tx: req_tx });
        req_rx.await.unwrap_or(1.0)
    }

    /// Returns a snapshot of the active table.
    pub async fn snapshot(&self) -> RatesSnapshot {
        let (req_tx, req_rx) = oneshot::channel();
        let _ = self.tx.send(RateOracleMessage::Snapshot { tx: req_tx });
        req_rx
            .await
            .unwrap_or_else(|_| RatesSnapshot { table: RateTable::fallback(), live: false })
    }
}

/// Keeps the active table and per-currency gauges.
struct RateRegistry {
    /// The active table.
    table: RateTable,
    /// Whether an update has been installed over the initial table.
    live: bool,
    /// Gauges by currency code.
    metrics: HashMap<String, CurrencyRateMetrics>,
}

impl RateRegistry {
    fn new(table: RateTable) -> Self {
        Self { table, live: false, metrics: HashMap::new() }
    }

    /// Installs a new table and updates the gauges.
    fn install(&mut self, table: RateTable) {
        for (code, rate) in table.iter() {
            self.metrics
                .entry(code.to_string())
                .or_insert_with(|| {
                    CurrencyRateMetrics::new_with_labels(&[("currency", code.to_string())])
                })
                .rate
                .set(rate);
        }
        self.table = table;
        self.live = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_fallback_immediately() {
        let oracle = RateOracle::new();

        let snapshot = oracle.snapshot().await;
        assert!(!snapshot.live);
        assert_eq!(snapshot.table, RateTable::fallback());
        assert_eq!(oracle.rate(&Currency::new("JPY")).await, 190.0);
    }

    #[tokio::test]
    async fn update_swaps_the_table_silently() {
        let oracle = RateOracle::new();
        oracle.set_rates([("USD".to_string(), 1.30)].into_iter().collect());

        let snapshot = oracle.snapshot().await;
        assert!(snapshot.live);
        assert_eq!(oracle.rate(&Currency::new("USD")).await, 1.30);
        // Codes absent from the new table convert at identity.
        assert_eq!(oracle.rate(&Currency::new("JPY")).await, 1.0);
    }

    #[tokio::test]
    async fn reference_rate_is_exact() {
        let oracle = RateOracle::with_table(
            [("GBP".to_string(), 0.99), ("USD".to_string(), 1.27)].into_iter().collect(),
        );
        assert_eq!(oracle.rate(&Currency::reference()).await, 1.0);
    }
}
