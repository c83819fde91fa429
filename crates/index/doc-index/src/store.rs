//! # In-memory vector index
//!
//! [`DocIndex`] keeps chunks and their embeddings side by side and ranks them by cosine
//! similarity against a query vector. It is built once (by `doc-loader`) and then only read,
//! so callers share it behind an `Arc` without locking.

use crate::error::IndexError;
use crate::types::Chunk;

/// A chunk with its similarity score against the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Vector index over embedded chunks. All vectors share `dimension`.
#[derive(Debug, Clone)]
pub struct DocIndex {
    embedding_model: String,
    dimension: usize,
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
}

impl DocIndex {
    /// Creates an empty index for vectors produced by `embedding_model` with `dimension` entries.
    pub fn new(embedding_model: impl Into<String>, dimension: usize) -> Self {
        Self {
            embedding_model: embedding_model.into(),
            dimension,
            chunks: Vec::new(),
            vectors: Vec::new(),
        }
    }

    /// Builds an index from parallel chunk / vector lists. Dimension is taken from the first vector.
    pub fn from_parts(
        embedding_model: impl Into<String>,
        chunks: Vec<Chunk>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<Self, IndexError> {
        if chunks.len() != vectors.len() {
            return Err(IndexError::Inconsistent(format!(
                "{} chunks but {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }
        let dimension = vectors.first().map(|v| v.len()).unwrap_or(0);
        let mut index = Self::new(embedding_model, dimension);
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            index.add(chunk, vector)?;
        }
        Ok(index)
    }

    /// Appends one chunk. The vector length must equal the index dimension.
    pub fn add(&mut self, chunk: Chunk, vector: Vec<f32>) -> Result<(), IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                got: vector.len(),
            });
        }
        self.chunks.push(chunk);
        self.vectors.push(vector);
        Ok(())
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub(crate) fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    /// Returns the top `k` chunks by cosine similarity, highest first.
    ///
    /// Equal scores keep insertion order. A query of the wrong dimension is an error.
    pub fn similarity_search(
        &self,
        query_embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredChunk>, IndexError> {
        if !self.is_empty() && query_embedding.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                got: query_embedding.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine_similarity(query_embedding, v)))
            .collect();

        // Stable sort keeps insertion order among ties; total_cmp gives NaN a fixed place.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, score)| ScoredChunk {
                chunk: self.chunks[i].clone(),
                score,
            })
            .collect())
    }
}

/// Cosine similarity `(a · b) / (||a|| * ||b||)`, in `[-1, 1]`.
///
/// Empty or zero vectors score 0.0, as does any non-finite result (NaN or infinite components).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let score = dot_product / (norm_a * norm_b);
    if score.is_finite() {
        score
    } else {
        0.0
    }
}
