use std::str::FromStr;

use anyhow::{Context, Result};

use crate::embedding::hash::DEFAULT_HASH_DIMENSION;
use crate::embedding::onnx::DEFAULT_EMBEDDING_MODEL;
use crate::inference::{
    DEFAULT_API_BASE, DEFAULT_CHAT_MODEL, DEFAULT_COVER_LETTER_MODEL, DEFAULT_TIMEOUT_SECS,
};
use crate::recommendation::DEFAULT_RECOMMENDATION_LIMIT;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a number does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub huggingface_api_key: String,
    pub inference_api_url: String,
    pub inference_timeout_secs: u64,
    pub cover_letter_model: String,
    pub chat_model: String,
    /// "fastembed" or "hash"
    pub embedding_backend: String,
    pub embedding_model: String,
    pub hash_embedding_dimension: usize,
    pub recommendation_limit: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            huggingface_api_key: require_env("HUGGINGFACE_API_KEY")?,
            inference_api_url: with_trailing_slash(env_or("INFERENCE_API_URL", DEFAULT_API_BASE)),
            inference_timeout_secs: parse_env("INFERENCE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            cover_letter_model: env_or("COVER_LETTER_MODEL", DEFAULT_COVER_LETTER_MODEL),
            chat_model: env_or("CHAT_MODEL", DEFAULT_CHAT_MODEL),
            embedding_backend: env_or("EMBEDDING_BACKEND", "fastembed").to_lowercase(),
            embedding_model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            hash_embedding_dimension: parse_env("HASH_EMBEDDING_DIMENSION", DEFAULT_HASH_DIMENSION)?,
            recommendation_limit: parse_env("RECOMMENDATION_LIMIT", DEFAULT_RECOMMENDATION_LIMIT)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn with_trailing_slash(url: String) -> String {
    if url.ends_with('/') {
        url
    } else {
        format!("{url}/")
    }
}
