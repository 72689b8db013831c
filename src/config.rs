//! Quoter configuration.

use crate::{
    constants::{
        DEFAULT_MAX_CONNECTIONS, DEFAULT_PAGE_RATE, DEFAULT_QUOTE_NUMBER_PREFIX,
        DEFAULT_QUOTE_VALIDITY_DAYS, DEFAULT_RATE_REFRESH_INTERVAL, EXCHANGE_RATE_API_URL,
    },
    rates::RateTable,
};
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, Ipv4Addr},
    path::Path,
    time::Duration,
};
use url::Url;

/// Quoter configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoterConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Exchange-rate configuration.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Quote computation configuration.
    #[serde(default)]
    pub quote: QuoteConfig,
    /// Studio identity included in exported documents.
    #[serde(default)]
    pub studio: StudioConfig,
}

impl QuoterConfig {
    /// Sets the server address.
    pub fn with_address(mut self, address: IpAddr) -> Self {
        self.server.address = address;
        self
    }

    /// Sets the server port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    /// Sets the metrics port.
    pub fn with_metrics_port(mut self, metrics_port: u16) -> Self {
        self.server.metrics_port = metrics_port;
        self
    }

    /// Sets the maximum number of concurrent RPC connections.
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.server.max_connections = max_connections;
        self
    }

    /// Sets the interval between rate refreshes.
    pub fn with_refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.rates.refresh_interval = refresh_interval;
        self
    }

    /// Sets whether the rate provider is never contacted.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.rates.offline = offline;
        self
    }

    /// Loads the configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        let config = serde_yaml::from_reader(&file)
            .wrap_err_with(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Saves the configuration to a YAML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> eyre::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}

/// RPC server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address to serve the RPC on.
    pub address: IpAddr,
    /// The port to serve the RPC on.
    pub port: u16,
    /// The port to serve the metrics on.
    pub metrics_port: u16,
    /// The maximum number of concurrent connections.
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 9303,
            metrics_port: 9000,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Exchange-rate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesConfig {
    /// The rate provider endpoint, keyed on the reference currency.
    pub provider_url: Url,
    /// The interval between rate refreshes.
    #[serde(with = "crate::serde::duration")]
    pub refresh_interval: Duration,
    /// Never contact the rate provider; serve the built-in fallback table.
    #[serde(default)]
    pub offline: bool,
    /// Serve this fixed table instead of fetching. Takes precedence over `offline`.
    #[serde(default)]
    pub pinned: Option<RateTable>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            provider_url: Url::parse(EXCHANGE_RATE_API_URL).expect("valid provider url"),
            refresh_interval: DEFAULT_RATE_REFRESH_INTERVAL,
            offline: false,
            pinned: None,
        }
    }
}

/// Quote computation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Price of one additional custom page, in reference-currency units.
    pub page_rate: u64,
    /// Number of days a quote stays valid after it is computed.
    pub validity_days: u64,
    /// Prefix for generated quote numbers.
    pub number_prefix: String,
}

impl QuoteConfig {
    /// How long a quote stays valid.
    pub fn validity(&self) -> Duration {
        Duration::from_secs(self.validity_days * 86_400)
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            page_rate: DEFAULT_PAGE_RATE,
            validity_days: DEFAULT_QUOTE_VALIDITY_DAYS,
            number_prefix: DEFAULT_QUOTE_NUMBER_PREFIX.to_string(),
        }
    }
}

/// Studio identity printed on exported documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Studio name.
    pub name: String,
    /// Studio contact email.
    pub contact_email: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            name: "Liam Designs".to_string(),
            contact_email: "hello@liamdesigns.dev".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roundtrips_through_yaml() {
        let config = QuoterConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let from_yaml = serde_yaml::from_str::<QuoterConfig>(&yaml).unwrap();
        assert_eq!(config, from_yaml);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config = serde_yaml::from_str::<QuoterConfig>(
            r"
server:
    address: 0.0.0.0
    port: 8080
    metrics_port: 9100
    max_connections: 64
",
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.quote, QuoteConfig::default());
        assert!(!config.rates.offline);
        assert!(config.rates.pinned.is_none());
    }

    #[test]
    fn pinned_table_parses() {
        let config = serde_yaml::from_str::<QuoterConfig>(
            r"
rates:
    provider_url: https://api.exchangerate-api.com/v4/latest/GBP
    refresh_interval: 900
    pinned:
        USD: 1.25
",
        )
        .unwrap();
        let pinned = config.rates.pinned.unwrap();
        assert_eq!(pinned.rate(&crate::types::Currency::new("USD")), 1.25);
    }

    #[test]
    fn file_roundtrip() {
        let config = QuoterConfig::default().with_port(0).with_offline(true);

        let file = tempfile::NamedTempFile::new().unwrap();
        config.save_to_file(file.path()).unwrap();

        assert_eq!(config, QuoterConfig::load_from_file(file.path()).unwrap());
    }
}
