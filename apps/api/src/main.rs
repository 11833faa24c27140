mod assistant;
mod config;
mod embedding;
mod errors;
mod generation;
mod inference;
mod models;
mod recommendation;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::Assistant;
use crate::config::Config;
use crate::embedding::create_embedder;
use crate::inference::{InferenceClient, InferenceSettings};
use crate::recommendation::RecommendationEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job board AI service v{}", env!("CARGO_PKG_VERSION"));

    // Embedding backend: built once, model weights load on first use
    let embedder = create_embedder(&config);
    info!(
        backend = embedder.name(),
        dimension = embedder.dimension(),
        "Embedder configured"
    );

    // Remote inference client
    let settings = InferenceSettings::from_config(&config);
    info!(
        api = %settings.api_base,
        cover_letter_model = %settings.cover_letter_model,
        chat_model = %settings.chat_model,
        timeout_secs = settings.timeout.as_secs(),
        "Inference client initialized"
    );
    let generator = Arc::new(InferenceClient::new(settings)?);

    let assistant = Assistant::new(generator, RecommendationEngine::new(embedder))
        .with_default_limit(config.recommendation_limit);

    let state = AppState {
        assistant: Arc::new(assistant),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the CRUD frontend host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
