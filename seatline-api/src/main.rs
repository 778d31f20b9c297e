use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use seatline_api::{app, AppState};
use seatline_store::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatline_api=debug,seatline_order=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // An explicit file replaces the config/ directory layering.
    let config_path = std::env::var_os("SEATLINE_CONFIG").map(PathBuf::from);
    let config = Config::load_from(config_path.as_deref()).context("Failed to load config")?;
    tracing::info!(
        routes = config.train.routes.len(),
        sections = config.train.sections.len(),
        seat_count = config.train.seat_count,
        "Starting Seatline API on port {}",
        config.server.port
    );

    let state = AppState::from_config(&config).context("Failed to build application state")?;
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
