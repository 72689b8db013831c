//! # Quoter CLI

use crate::{config::QuoterConfig, spawn::try_spawn_with_args};
use clap::Parser;
use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
    time::Duration,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// The quoter service computes, converts and exports price quotes for the studio site.
#[derive(Debug, Parser)]
#[command(author, version, about = "Quoter", long_about = None)]
pub struct Args {
    /// The configuration file.
    ///
    /// If missing, a default one will be used and stored in the working directory under
    /// `quoter.yaml`.
    #[arg(long, value_name = "CONFIG", env = "QUOTER_CONFIG", default_value = "quoter.yaml")]
    pub config: PathBuf,
    /// The package catalog file. Maps package and extra names to prices and feature lists.
    ///
    /// If missing, a default one will be used and stored in the working directory under
    /// `catalog.yaml`.
    #[arg(long, value_name = "CATALOG", env = "QUOTER_CATALOG", default_value = "catalog.yaml")]
    pub catalog: PathBuf,
    /// The address to serve the RPC on.
    #[arg(long = "http.addr", value_name = "ADDR", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub address: IpAddr,
    /// The port to serve the RPC on.
    #[arg(long = "http.port", value_name = "PORT", default_value_t = 9303)]
    pub port: u16,
    /// The port to serve the metrics on.
    #[arg(long = "http.metrics-port", value_name = "PORT", default_value_t = 9000)]
    pub metrics_port: u16,
    /// The interval between exchange-rate refreshes.
    #[arg(long, value_name = "SECONDS", value_parser = parse_duration_secs, default_value = "900")]
    pub rate_refresh_interval: Duration,
    /// Never contact the rate provider; serve the built-in fallback rate table.
    #[arg(long, default_value_t = false)]
    pub offline: bool,
}

impl Args {
    /// Run the quoter service.
    pub async fn run(self) -> eyre::Result<()> {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .init();

        let config_path = self.config.clone();
        let catalog_path = self.catalog.clone();
        try_spawn_with_args(self, &config_path, &catalog_path).await?.server.stopped().await;

        Ok(())
    }

    /// Merges [`Args`] values into an existing [`QuoterConfig`] instance.
    pub fn merge_config(self, config: QuoterConfig) -> QuoterConfig {
        config
            .with_address(self.address)
            .with_port(self.port)
            .with_metrics_port(self.metrics_port)
            .with_refresh_interval(self.rate_refresh_interval)
            .with_offline(self.offline)
    }
}

/// Parses a string representing seconds to a [`Duration`].
fn parse_duration_secs(arg: &str) -> Result<Duration, std::num::ParseIntError> {
    let seconds = arg.parse()?;
    Ok(Duration::from_secs(seconds))
}
