//! Yojitsu API Server
//!
//! Main entry point for the budget-versus-actuals service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yojitsu_api::{AppState, create_router};
use yojitsu_core::store::{Snapshot, Store};
use yojitsu_shared::AppConfig;
use yojitsu_shared::telemetry::TracingMonitor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = match &config.seed.path {
        Some(path) => {
            let snapshot = Snapshot::from_path(path)
                .with_context(|| format!("Failed to load seed snapshot {path}"))?;
            Store::from_snapshot(snapshot).context("Seed snapshot is inconsistent")?
        }
        None => {
            info!("No seed configured, starting with an empty store");
            Store::new()
        }
    };

    let monitor = Arc::new(TracingMonitor::new(Duration::from_millis(
        config.logging.slow_operation_ms,
    )));
    let state = AppState::new(store, &config, monitor);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(
        fiscal_start_month = config.fiscal.start_month,
        "Server listening on {}", addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}
