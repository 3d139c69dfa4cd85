use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_screener::config::Config;
use resume_screener::nlp::ensure_resources_loaded_from;
use resume_screener::routes::build_router;
use resume_screener::scoring::HeuristicScorer;
use resume_screener::screening::Screener;
use resume_screener::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_screener={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume screener v{}", env!("CARGO_PKG_VERSION"));

    // Language resources are loaded once, up front, so a broken bundle fails startup
    let resources = ensure_resources_loaded_from(&config.resource_source())?;

    let scorer = Arc::new(HeuristicScorer::new(resources, config.weights));
    info!(weights = ?scorer.weights(), "Heuristic scorer initialized");

    let state = AppState {
        config: config.clone(),
        screener: Arc::new(Screener::new(resources, scorer)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
