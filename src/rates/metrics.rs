//! Rate metrics.

use metrics::{Counter, Gauge};
use metrics_derive::Metrics;

/// Metrics for a single currency tracked by the [`RateOracle`](crate::rates::RateOracle).
#[derive(Metrics)]
#[metrics(scope = "rates")]
pub(crate) struct CurrencyRateMetrics {
    /// Multiplier from the reference currency.
    pub(crate) rate: Gauge,
}

/// Metrics for the rate fetcher task.
#[derive(Metrics)]
#[metrics(scope = "rates_fetcher")]
pub(crate) struct FetcherMetrics {
    /// Successful rate refreshes.
    pub(crate) refreshes: Counter,
    /// Failed refresh attempts.
    pub(crate) failures: Counter,
}
