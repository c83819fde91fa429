//! # Text Embeddings
//!
//! This crate defines the embedding service interface for generating text embeddings.
//! The document index and the query path must use the same service and model, otherwise
//! vector dimensions and similarity scores are meaningless.

use async_trait::async_trait;

mod config;
pub use config::{EmbeddingConfig, EnvEmbeddingConfig, DEFAULT_EMBEDDING_MODEL};

/// Service for generating text embeddings.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Model identifier; persisted with the index so a model change forces a rebuild.
    fn model_name(&self) -> &str;

    /// Generates an embedding vector for a single text string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error>;

    /// Generates embedding vectors for multiple texts in a single API call, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error>;
}
