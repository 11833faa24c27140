//! Axum route handlers for cover letters and advice chat.
//!
//! These never fail on the generation side: the assistant falls back to
//! templated text. Only malformed or empty input is rejected.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::generation::{ChatRequest, CoverLetterRequest, GenerationResult};
use crate::state::AppState;

/// POST /api/v1/cover-letters/generate
///
/// Returns the letter text; the caller persists it with the cover-letter record.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    payload: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let Json(request) = payload?;
    Ok(Json(state.assistant.request_cover_letter(request).await))
}

/// POST /api/v1/ai/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let Json(request) = payload?;

    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    Ok(Json(state.assistant.request_chat_reply(request).await))
}
