//! # Document index
//!
//! Pre-embedded text chunks searched by cosine similarity.
//!
//! ## Modules
//!
//! - [`types`] - `Document` (raw input) and `Chunk` (indexed unit)
//! - [`store`] - `DocIndex`, the in-memory vector index
//! - [`persist`] - two-artifact on-disk format (`index.json` + `docstore.json`)
//! - [`retriever`] - `Retriever` trait and the embedding-backed `VectorRetriever`
//!
//! ## External Interactions
//!
//! - **Embedding services**: query vectors come from the same `EmbeddingService` used at build time
//! - **Filesystem**: the store directory written by `doc-loader`

pub mod error;
pub mod persist;
pub mod retriever;
pub mod store;
pub mod types;

pub use error::IndexError;
pub use persist::{artifacts_exist, DOCSTORE_FILE, INDEX_FILE};
pub use retriever::{Retriever, VectorRetriever, DEFAULT_TOP_K};
pub use store::{cosine_similarity, DocIndex, ScoredChunk};
pub use types::{Chunk, Document};
