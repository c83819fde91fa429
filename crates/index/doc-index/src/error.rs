use std::path::PathBuf;

use finbuddy_core::FinBuddyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Index artifact missing: {0}")]
    MissingArtifact(PathBuf),

    #[error("Index artifact corrupt ({path}): {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Index inconsistent: {0}")]
    Inconsistent(String),

    #[error("Index built with embedding model {stored}, configured model is {configured}")]
    ModelMismatch { stored: String, configured: String },

    #[error("Embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("No documents to index")]
    Empty,

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IndexError> for FinBuddyError {
    fn from(err: IndexError) -> Self {
        FinBuddyError::IndexUnavailable(err.to_string())
    }
}
