//! Inference client — the single point of entry for remote text generation.
//!
//! No other module may call the inference API directly.
//!
//! Talks to a Hugging Face style endpoint: `POST {api_base}{model}` with a
//! bearer token and `{inputs, parameters}`, expecting `[{generated_text}]` back.
//! One attempt per request, bounded by the client timeout. Every failure is
//! logged with its cause and reported to the caller as `GenerationFailure`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::generation::prompts::{build_chat_prompt, build_cover_letter_prompt, extract_chat_reply};
use crate::generation::{GenerationFailure, GenerationKind, GenerationRequest, TextGenerator};

pub const DEFAULT_API_BASE: &str = "https://api-inference.huggingface.co/models/";
pub const DEFAULT_COVER_LETTER_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_CHAT_MODEL: &str = "facebook/blenderbot-400M-distill";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error bodies are cut to this many characters before logging.
const MAX_LOGGED_BODY: usize = 200;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("response carried no generated text")]
    EmptyText,
}

#[derive(Debug, Clone)]
pub struct InferenceSettings {
    pub api_base: String,
    pub api_key: String,
    pub timeout: Duration,
    pub cover_letter_model: String,
    pub chat_model: String,
}

impl InferenceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_base: config.inference_api_url.clone(),
            api_key: config.huggingface_api_key.clone(),
            timeout: Duration::from_secs(config.inference_timeout_secs),
            cover_letter_model: config.cover_letter_model.clone(),
            chat_model: config.chat_model.clone(),
        }
    }

    fn model_for(&self, kind: GenerationKind) -> &str {
        match kind {
            GenerationKind::CoverLetter => &self.cover_letter_model,
            GenerationKind::Chat => &self.chat_model,
        }
    }
}

/// Sampling parameters sent alongside the prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub max_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_sample: Option<bool>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl GenerationParameters {
    pub fn for_kind(kind: GenerationKind) -> Self {
        match kind {
            GenerationKind::CoverLetter => Self {
                max_length: 500,
                min_length: Some(200),
                do_sample: Some(true),
                temperature: 0.7,
                top_p: None,
            },
            GenerationKind::Chat => Self {
                max_length: 200,
                min_length: None,
                do_sample: None,
                temperature: 0.8,
                top_p: Some(0.9),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: Option<String>,
}

#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    settings: InferenceSettings,
}

impl InferenceClient {
    pub fn new(settings: InferenceSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    /// Makes one call to the model serving `kind` and returns the raw generated text.
    pub async fn call(&self, kind: GenerationKind, prompt: &str) -> Result<String, InferenceError> {
        let model = self.settings.model_for(kind);
        let url = format!("{}{}", self.settings.api_base, model);
        let request_body = InferenceRequest {
            inputs: prompt,
            parameters: GenerationParameters::for_kind(kind),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                message: body.chars().take(MAX_LOGGED_BODY).collect(),
            });
        }

        let payload: Vec<GeneratedText> = serde_json::from_str(&body)?;
        let text = payload
            .into_iter()
            .next()
            .and_then(|g| g.generated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(InferenceError::EmptyText)?;

        debug!(
            model,
            kind = kind.as_str(),
            chars = text.len(),
            "Inference call succeeded"
        );
        Ok(text)
    }

    fn classify(&self, error: reqwest::Error) -> InferenceError {
        if error.is_timeout() {
            InferenceError::Timeout(self.settings.timeout)
        } else {
            InferenceError::Transport(error)
        }
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
        let kind = request.kind();
        let prompt = match request {
            GenerationRequest::CoverLetter(r) => build_cover_letter_prompt(r),
            GenerationRequest::Chat(r) => build_chat_prompt(r),
        };

        let outcome = self.call(kind, &prompt).await.and_then(|text| {
            let text = match kind {
                GenerationKind::CoverLetter => text.trim(),
                GenerationKind::Chat => extract_chat_reply(&text),
            };
            if text.is_empty() {
                Err(InferenceError::EmptyText)
            } else {
                Ok(text.to_string())
            }
        });

        outcome.map_err(|e| {
            warn!(
                kind = kind.as_str(),
                model = self.settings.model_for(kind),
                error = %e,
                "Remote generation failed"
            );
            GenerationFailure
        })
    }
}
