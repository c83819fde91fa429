//! Loader configuration and outcome.

use std::path::PathBuf;

/// Default store directory, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "vectorstore/faiss_store";
pub const DEFAULT_INTERNAL_DOCS: &str = "data/internal_docs";
pub const DEFAULT_EXTERNAL_DOCS: &str = "data/external_docs";
/// Documents per embedding request. Gemini's OpenAI endpoint accepts at most 100 inputs.
pub const DEFAULT_EMBED_BATCH_SIZE: usize = 100;

/// Where the persisted index lives and which raw folders rebuild it.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub store_path: PathBuf,
    pub internal_docs: PathBuf,
    pub external_docs: PathBuf,
    /// Max documents per `embed_batch` call; 0 is treated as 1.
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            internal_docs: PathBuf::from(DEFAULT_INTERNAL_DOCS),
            external_docs: PathBuf::from(DEFAULT_EXTERNAL_DOCS),
            batch_size: DEFAULT_EMBED_BATCH_SIZE,
        }
    }
}

/// How [`crate::load_or_rebuild`] obtained the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Rebuilt,
}
