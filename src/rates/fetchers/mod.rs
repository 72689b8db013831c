mod exchange_rate_api;
pub use exchange_rate_api::*;

/// List of supported rate fetchers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RateFetcher {
    /// exchangerate-api.com.
    ExchangeRateApi,
}
