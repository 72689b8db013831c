//! Exchange rates: the rate table, the oracle task and its fetchers.

mod fetchers;
pub use fetchers::*;

mod metrics;

mod oracle;
pub use oracle::{RateOracle, RateOracleMessage, RatesSnapshot};

mod table;
pub use table::RateTable;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::EXCHANGE_RATE_API_URL, types::Currency};
    use std::time::Duration;
    use tokio::time::sleep;

    #[ignore] // hits the live exchangerate-api.com endpoint
    #[tokio::test]
    async fn exchange_rate_api() {
        let oracle = RateOracle::new();
        oracle.spawn_fetcher(
            RateFetcher::ExchangeRateApi,
            EXCHANGE_RATE_API_URL.parse().unwrap(),
            Duration::from_secs(60),
        );

        // Allow the provider to answer
        sleep(Duration::from_secs(2)).await;

        let snapshot = oracle.snapshot().await;
        assert!(snapshot.live);
        assert!(oracle.rate(&Currency::new("USD")).await > 0.0);
    }
}
