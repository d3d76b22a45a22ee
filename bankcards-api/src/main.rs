//! bank-cards API server entry point

use anyhow::Context;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bankcards_api::config::ApiConfig;
use bankcards_api::routes;
use bankcards_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::from_env();
    let state =
        AppState::new(&config).context("failed to initialize application state")?;

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("bank-cards API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
