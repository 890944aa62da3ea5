mod routes;
mod singleton;
mod state;

use anyhow::{Context, Result};
use famplan_core::config::PlannerConfig;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PlannerConfig::load()?;
    config.apply_time_zone()?;
    let data_dir = config.data_path();

    // Ensure only one instance rewrites events.json
    let _lock = singleton::acquire_lock(&data_dir)?;

    let state = AppState::from_config(&config)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.bind))?;
    info!("famplan-server listening on http://{} (data: {})", addr, data_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
