//! AlgoTrader API Binary
//!
//! Starts the broker proxy HTTP server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin algotrader-api
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `DHAN_SANDBOX_TOKEN`: DhanHQ bearer token
//! - `UPSTOX_API_SECRET`: Upstox app secret
//!
//! ## Optional
//! - `DHAN_API_URL`: DhanHQ base URL (default: <https://api-sandbox.dhan.co>)
//! - `UPSTOX_API_URL`: Upstox base URL (default: <https://api.upstox.com>)
//! - `PORT`: HTTP port (default: 8000)
//! - `BIND_ADDRESS`: Listen address (default: 0.0.0.0)
//! - `METRICS_ENABLED`: Serve Prometheus metrics (default: true)
//! - `OTEL_ENABLED`: Export spans over OTLP (default: false)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use algotrader_api::infrastructure::config::AppConfig;
use algotrader_api::infrastructure::http::{AppState, ENDPOINTS, HttpServer, create_router};
use algotrader_api::infrastructure::telemetry;
use algotrader_api::{
    DhanConfig, DhanHqClient, ExchangeTokenUseCase, FetchIndexPriceUseCase, UpstoxClient,
    UpstoxConfig, init_metrics,
};
use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
#[allow(clippy::expect_used)]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    load_dotenv();

    let _telemetry_guard = telemetry::init();

    tracing::info!("Starting AlgoTrader API");

    let config = AppConfig::from_env().context("invalid configuration")?;
    log_config(&config);

    if config.metrics_enabled {
        init_metrics().context("failed to install Prometheus recorder")?;
    }

    let dhan_client = DhanHqClient::new(DhanConfig::new(
        config.dhan.api_url.clone(),
        config.dhan.token.clone(),
    ))?;
    let upstox_client = UpstoxClient::new(UpstoxConfig::new(
        config.upstox.api_url.clone(),
        config.upstox.api_secret.clone(),
    ))?;

    let state = AppState {
        fetch_index_price: Arc::new(FetchIndexPriceUseCase::new(Arc::new(dhan_client))),
        exchange_token: Arc::new(ExchangeTokenUseCase::new(Arc::new(upstox_client))),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let router = create_router(state);

    let shutdown_token = CancellationToken::new();
    let server = HttpServer::new(config.server.socket_addr(), router, shutdown_token.clone());

    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received");
        signal_token.cancel();
    });

    log_endpoints(&config);
    server.run().await?;

    tracing::info!("AlgoTrader API stopped");
    Ok(())
}

/// Load .env from the current directory or the nearest ancestor that has one.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration. Secrets are never logged.
fn log_config(config: &AppConfig) {
    tracing::info!(
        addr = %config.server.socket_addr(),
        dhan_api_url = %config.dhan.api_url,
        upstox_api_url = %config.upstox.api_url,
        metrics_enabled = config.metrics_enabled,
        "Configuration loaded"
    );
}

fn log_endpoints(config: &AppConfig) {
    let addr = config.server.socket_addr();
    for endpoint in &ENDPOINTS {
        if endpoint.path == "/metrics" && !config.metrics_enabled {
            continue;
        }
        tracing::info!(
            "  {:<6} http://{addr}{}  {}",
            endpoint.method,
            endpoint.path,
            endpoint.description
        );
    }
    tracing::info!("CORS enabled for all origins");
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
