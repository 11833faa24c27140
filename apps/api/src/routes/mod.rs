pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/jobs/recommended",
            post(recommendation::handle_recommended),
        )
        .route(
            "/api/v1/cover-letters/generate",
            post(generation::handle_generate_cover_letter),
        )
        .route("/api/v1/ai/chat", post(generation::handle_chat))
        .with_state(state)
}
