//! # Document Loader
//!
//! Reads raw `.txt` documents from the internal and external folders, embeds them, and
//! produces the persisted [`DocIndex`].
//!
//! Policy is **load-or-rebuild**: an existing store is reused when both artifacts parse and
//! were built with the configured embedding model; anything else triggers a rebuild from the
//! raw folders followed by a save.

mod config;
mod data_loader;

pub use config::{
    LoadOutcome, LoaderConfig, DEFAULT_EMBED_BATCH_SIZE, DEFAULT_EXTERNAL_DOCS,
    DEFAULT_INTERNAL_DOCS, DEFAULT_STORE_PATH,
};
pub use data_loader::{load_all_datasets, load_text_folder};

use std::time::Instant;

use doc_index::{artifacts_exist, Chunk, DocIndex, Document, IndexError};
use embedding::EmbeddingService;
use tracing::{debug, info, warn};

/// Embeds `docs` in requests of at most `batch_size` texts and builds an index tagged with
/// the embedder's model.
pub async fn build_index(
    docs: Vec<Document>,
    embedder: &dyn EmbeddingService,
    batch_size: usize,
) -> Result<DocIndex, IndexError> {
    if docs.is_empty() {
        return Err(IndexError::Empty);
    }
    let batch_size = batch_size.max(1);
    let texts: Vec<String> = docs.iter().map(|d| d.content.clone()).collect();
    let total_batches = texts.len().div_ceil(batch_size);
    info!(
        documents = texts.len(),
        batch_size, total_batches, "Generating embeddings"
    );

    let mut vectors = Vec::with_capacity(texts.len());
    for (batch_idx, batch) in texts.chunks(batch_size).enumerate() {
        let embedded = embedder.embed_batch(batch).await.map_err(|e| {
            IndexError::Embedding(format!("batch {}/{}: {:#}", batch_idx + 1, total_batches, e))
        })?;
        if embedded.len() != batch.len() {
            return Err(IndexError::Embedding(format!(
                "batch {}/{}: expected {} embeddings, got {}",
                batch_idx + 1,
                total_batches,
                batch.len(),
                embedded.len()
            )));
        }
        vectors.extend(embedded);
        debug!(
            batch = batch_idx + 1,
            total_batches,
            embedded = vectors.len(),
            "Embedded batch"
        );
    }

    let chunks: Vec<Chunk> = docs.into_iter().map(Chunk::from).collect();
    DocIndex::from_parts(embedder.model_name(), chunks, vectors)
}

/// Rebuilds the index from the raw folders and saves it to `config.store_path`.
pub async fn rebuild(
    config: &LoaderConfig,
    embedder: &dyn EmbeddingService,
) -> Result<DocIndex, IndexError> {
    let start_time = Instant::now();
    info!(
        internal = %config.internal_docs.display(),
        external = %config.external_docs.display(),
        "Rebuilding document index from datasets"
    );
    let docs = load_all_datasets(&config.internal_docs, &config.external_docs).await?;
    let index = build_index(docs, embedder, config.batch_size).await?;
    index.save(&config.store_path)?;
    info!(
        chunks = index.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Document index rebuilt"
    );
    Ok(index)
}

/// Tries the persisted store; on any failure (missing, corrupt, other embedding model)
/// rebuilds from the raw folders.
///
/// An error here means neither path produced an index; callers treat it as
/// "no retriever available".
pub async fn load_or_rebuild(
    config: &LoaderConfig,
    embedder: &dyn EmbeddingService,
) -> Result<(DocIndex, LoadOutcome), IndexError> {
    if artifacts_exist(&config.store_path) {
        match load_checked(config, embedder) {
            Ok(index) => return Ok((index, LoadOutcome::Loaded)),
            Err(e) => warn!(error = %e, "Could not load vector store"),
        }
    } else {
        info!(
            path = %config.store_path.display(),
            "No persisted index found"
        );
    }
    let index = rebuild(config, embedder).await?;
    Ok((index, LoadOutcome::Rebuilt))
}

fn load_checked(
    config: &LoaderConfig,
    embedder: &dyn EmbeddingService,
) -> Result<DocIndex, IndexError> {
    let index = DocIndex::load(&config.store_path)?;
    if index.embedding_model() != embedder.model_name() {
        return Err(IndexError::ModelMismatch {
            stored: index.embedding_model().to_string(),
            configured: embedder.model_name().to_string(),
        });
    }
    Ok(index)
}
