//! AppConfig: BaseConfig + LLM and embedding provider configs. Use load() for env-based loading.

use anyhow::Result;
use embedding::{EmbeddingConfig, EnvEmbeddingConfig};
use finbuddy_core::FinBuddyError;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::BaseConfig;

/// Full configuration for commands that talk to the model.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub embedding: EnvEmbeddingConfig,
}

impl AppConfig {
    /// Load from environment variables. A missing API key is a [`FinBuddyError::Config`].
    /// Call validate() after load to fail fast before any provider is built.
    pub fn load() -> Result<Self, FinBuddyError> {
        let base = BaseConfig::load().map_err(|e| FinBuddyError::Config(format!("{:#}", e)))?;
        let llm = EnvLlmConfig::from_env().map_err(|e| FinBuddyError::Config(format!("{:#}", e)))?;
        let embedding = EnvEmbeddingConfig::from_env()
            .map_err(|e| FinBuddyError::Config(format!("{:#}", e)))?;
        Ok(Self {
            base,
            llm,
            embedding,
        })
    }

    /// Validate base limits, provider URLs and the embedding key.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        if reqwest::Url::parse(self.llm.base_url()).is_err() {
            anyhow::bail!(
                "OPENAI_BASE_URL is set but not a valid URL: {}",
                self.llm.base_url()
            );
        }
        if let Some(url) = self.embedding.base_url() {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("EMBEDDING_BASE_URL is set but not a valid URL: {}", url);
            }
        }
        self.embedding.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }

    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
}
