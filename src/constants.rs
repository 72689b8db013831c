//! Quoter constants.

use std::time::Duration;

/// The currency in which all catalog prices are authored.
///
/// Every rate in a [`RateTable`](crate::rates::RateTable) is a multiplier from this currency.
pub const REFERENCE_CURRENCY: &str = "GBP";

/// Price of one additional custom page, in reference-currency units.
pub const DEFAULT_PAGE_RATE: u64 = 30;

/// Number of days a quote stays valid after it is computed.
pub const DEFAULT_QUOTE_VALIDITY_DAYS: u64 = 14;

/// Prefix for generated quote numbers.
pub const DEFAULT_QUOTE_NUMBER_PREFIX: &str = "LD";

/// The public exchangerate-api.com endpoint for GBP-based rates.
///
/// The free tier is limited to 1,500 requests per month, so refreshes should stay infrequent.
pub const EXCHANGE_RATE_API_URL: &str = "https://api.exchangerate-api.com/v4/latest/GBP";

/// Default interval between exchange-rate refreshes.
pub const DEFAULT_RATE_REFRESH_INTERVAL: Duration = Duration::from_secs(900);

/// Default maximum number of concurrent connections the RPC server accepts.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 500;
