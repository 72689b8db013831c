//! Quoter spawn utilities.

use crate::{
    cli::Args,
    config::QuoterConfig,
    engine::QuoteEngine,
    metrics::{RpcMetricsService, setup_exporter},
    rates::{RateFetcher, RateOracle},
    rpc::{QuoteApiServer, Quoter},
    types::PackageCatalog,
};
use http::header;
use jsonrpsee::server::{
    RpcServiceBuilder, Server, ServerHandle, middleware::http::ProxyGetRequestLayer,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::Path};
use tower::ServiceBuilder;
use tower_http::cors::{AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Context returned once the quoter is launched.
#[derive(Debug, Clone)]
pub struct QuoterHandle {
    /// The socket address to which the server is bound.
    pub local_addr: SocketAddr,
    /// Handle to the RPC server.
    pub server: ServerHandle,
    /// The rate oracle serving the conversion rates.
    pub rates: RateOracle,
    /// Metrics collector handle.
    pub metrics: PrometheusHandle,
}

impl QuoterHandle {
    /// Returns the url to the http server.
    pub fn http_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }
}

/// Attempts to spawn the quote service using CLI arguments and a configuration file.
pub async fn try_spawn_with_args<P: AsRef<Path>>(
    args: Args,
    config_path: P,
    catalog_path: P,
) -> eyre::Result<QuoterHandle> {
    let config = if !config_path.as_ref().exists() {
        let config = args.merge_config(QuoterConfig::default());
        config.save_to_file(&config_path)?;
        config
    } else {
        // File exists: load and override with CLI values.
        args.merge_config(QuoterConfig::load_from_file(&config_path)?)
    };

    let catalog = if !catalog_path.as_ref().exists() {
        let catalog = PackageCatalog::default();
        catalog.save_to_file(&catalog_path)?;
        catalog
    } else {
        PackageCatalog::load_from_file(&catalog_path)?
    };

    try_spawn(config, catalog).await
}

/// Spawns the quote service using the provided [`QuoterConfig`] and [`PackageCatalog`].
pub async fn try_spawn(
    config: QuoterConfig,
    catalog: PackageCatalog,
) -> eyre::Result<QuoterHandle> {
    catalog.validate()?;

    // setup metrics exporter
    let metrics = setup_exporter((config.server.address, config.server.metrics_port)).await;

    // construct rate oracle
    let rates = match &config.rates.pinned {
        Some(table) => {
            warn!("Serving a pinned rate table. Conversions will not track the market.");
            RateOracle::with_table(table.clone())
        }
        None => {
            let oracle = RateOracle::new();
            if config.rates.offline {
                warn!("Offline mode: serving the built-in fallback rate table.");
            } else {
                oracle.spawn_fetcher(
                    RateFetcher::ExchangeRateApi,
                    config.rates.provider_url.clone(),
                    config.rates.refresh_interval,
                );
            }
            oracle
        }
    };

    // construct rpc module
    let engine =
        QuoteEngine::new(catalog, config.quote.clone(), config.studio.clone(), rates.clone());
    let rpc = Quoter::new(engine).into_rpc();

    // http layers: the site calls from the browser, so any origin may connect
    let cors = CorsLayer::new()
        .allow_methods(AllowMethods::any())
        .allow_origin(AllowOrigin::any())
        .allow_headers([header::CONTENT_TYPE]);

    // start server
    let server = Server::builder()
        .http_only()
        .max_connections(config.server.max_connections)
        .set_http_middleware(
            ServiceBuilder::new()
                .layer(cors)
                .layer(ProxyGetRequestLayer::new("/health", "health")?),
        )
        .set_rpc_middleware(RpcServiceBuilder::new().layer_fn(RpcMetricsService::new))
        .build((config.server.address, config.server.port))
        .await?;
    let addr = server.local_addr()?;
    info!(%addr, "Started quote service");

    Ok(QuoterHandle { local_addr: addr, server: server.start(rpc), rates, metrics })
}
