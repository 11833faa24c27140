//! Axum route handlers for job recommendations.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobDocument;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub skills: String,
    #[serde(default)]
    pub jobs: Vec<JobDocument>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub jobs: Vec<JobDocument>,
}

/// POST /api/v1/jobs/recommended
///
/// Ranks the supplied catalog slice against the candidate's skills.
/// Blank skills are rejected here; the engine itself would accept them.
pub async fn handle_recommended(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, AppError> {
    let Json(request) = payload?;

    if request.skills.trim().is_empty() {
        return Err(AppError::Validation(
            "Please update your skills in profile to get recommendations".to_string(),
        ));
    }

    let jobs = state
        .assistant
        .request_recommendations(&request.skills, request.jobs, request.limit)
        .await;

    Ok(Json(RecommendResponse { jobs }))
}
