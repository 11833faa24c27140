use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::profile::{CandidateProfile, ChatTurn};

// ────────────────────────────────────────────────────────────────────────────
// Requests
// ────────────────────────────────────────────────────────────────────────────

/// Context for a cover letter. Only `job_description` is mandatory.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverLetterRequest {
    pub job_description: String,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub profile: CandidateProfile,
}

/// A chat message plus earlier turns, oldest first.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone)]
pub enum GenerationRequest {
    CoverLetter(CoverLetterRequest),
    Chat(ChatRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    CoverLetter,
    Chat,
}

impl GenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::CoverLetter => "cover_letter",
            GenerationKind::Chat => "chat",
        }
    }
}

impl GenerationRequest {
    pub fn kind(&self) -> GenerationKind {
        match self {
            GenerationRequest::CoverLetter(_) => GenerationKind::CoverLetter,
            GenerationRequest::Chat(_) => GenerationKind::Chat,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

/// Where a piece of generated text came from. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub text: String,
    pub provenance: Provenance,
}

impl GenerationResult {
    pub fn remote(text: String) -> Self {
        Self {
            text,
            provenance: Provenance::Remote,
        }
    }

    pub fn fallback(text: String) -> Self {
        Self {
            text,
            provenance: Provenance::Fallback,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generator seam
// ────────────────────────────────────────────────────────────────────────────

/// Any remote failure: timeout, bad status, transport error or unusable payload.
/// The cause is logged by the generator; callers only ever fall back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("remote text generation failed")]
pub struct GenerationFailure;

/// Remote text generation backend. Carried by `Assistant` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure>;
}
