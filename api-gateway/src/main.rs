//! FairPrice API Gateway
//!
//! HTTP front for the pricing engine:
//! - POST /api/price/recommend: recommended price, range, risk and scenarios
//! - GET /ping, GET /health: probes

mod config;
mod error;
mod rate_limit;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use fairprice_engine::PricingEngine;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{GatewayConfig, LogFormat};
use crate::rate_limit::RateLimiter;
use crate::routes::AppState;

const DEFAULT_LOG_FILTER: &str = "api_gateway=info,fairprice_engine=info,tower_http=info";

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::load()?;
    init_tracing(config.log_format);

    info!("Starting FairPrice API Gateway v{}", env!("CARGO_PKG_VERSION"));

    let engine = PricingEngine::new(config.engine_config());
    info!(
        cost_weight = %engine.weights().cost(),
        market_weight = %engine.weights().market(),
        "pricing engine ready"
    );

    let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
    let sweeper = limiter.clone().spawn_sweeper();

    let state = AppState { engine, limiter };
    let cors = routes::cors_layer(&config.cors)?;
    let app = routes::router(state, cors);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!("API Gateway listening on {}", addr);
    info!("Endpoints:");
    info!("  POST /api/price/recommend");
    info!("  GET  /ping");
    info!("  GET  /health");

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal");
    };

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    sweeper.abort();
    info!("Shutting down API Gateway");
    Ok(())
}
