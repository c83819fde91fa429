//! Embedding configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;

/// Default embedding model when `EMBEDDING_MODEL` is unset.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Embedding service configuration interface.
pub trait EmbeddingConfig: Send + Sync {
    fn model(&self) -> &str;
    /// API key for the OpenAI-compatible embedding endpoint.
    fn api_key(&self) -> &str;
    /// Optional base URL (`EMBEDDING_BASE_URL`, falling back to `OPENAI_BASE_URL`).
    fn base_url(&self) -> Option<&str>;
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub embedding_model: String,
    pub api_key: String,
    pub base_url: Option<String>,
}

impl EmbeddingConfig for EnvEmbeddingConfig {
    fn model(&self) -> &str {
        &self.embedding_model
    }
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|s| !s.is_empty())
    }
}

impl EnvEmbeddingConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let embedding_model = env::var("EMBEDDING_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());
        let api_key = env::var("EMBEDDING_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .unwrap_or_default();
        let base_url = env::var("EMBEDDING_BASE_URL")
            .or_else(|_| env::var("OPENAI_BASE_URL"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            embedding_model,
            api_key,
            base_url,
        })
    }

    /// Validate config: an API key must be present.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!(
                "Embedding requires EMBEDDING_API_KEY, OPENAI_API_KEY or GOOGLE_API_KEY to be set"
            );
        }
        Ok(())
    }
}
