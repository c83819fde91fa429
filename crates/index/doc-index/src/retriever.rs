//! Retriever seam consumed by the orchestrator.

use std::sync::Arc;

use async_trait::async_trait;
use embedding::EmbeddingService;
use tracing::{debug, instrument};

use crate::store::DocIndex;
use crate::types::Chunk;

/// Number of chunks returned per query unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 4;

/// Given a query, returns semantically similar pre-indexed chunks, most similar first.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Vec<Chunk>, anyhow::Error>;
}

/// [`Retriever`] that embeds the query and searches a [`DocIndex`].
pub struct VectorRetriever {
    index: Arc<DocIndex>,
    embedder: Arc<dyn EmbeddingService>,
    top_k: usize,
}

impl VectorRetriever {
    pub fn new(index: Arc<DocIndex>, embedder: Arc<dyn EmbeddingService>) -> Self {
        Self {
            index,
            embedder,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn index(&self) -> &DocIndex {
        &self.index
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    #[instrument(skip(self, query), fields(top_k = self.top_k, index_len = self.index.len()))]
    async fn retrieve(&self, query: &str) -> Result<Vec<Chunk>, anyhow::Error> {
        if self.index.is_empty() {
            return Ok(Vec::new());
        }
        let query_embedding = self.embedder.embed(query).await?;
        let scored = self.index.similarity_search(&query_embedding, self.top_k)?;
        debug!(
            hits = scored.len(),
            best_score = scored.first().map(|s| s.score).unwrap_or(0.0),
            "Retrieved chunks"
        );
        Ok(scored.into_iter().map(|s| s.chunk).collect())
    }
}
