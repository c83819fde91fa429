//! Input documents and indexed chunks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw text document loaded from disk. `source` is the originating file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub source: String,
}

impl Document {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }
}

/// An indexed unit of text, returned by retrieval as a source document reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: Uuid,
    pub content: String,
    pub source: String,
}

impl Chunk {
    /// Creates a chunk with a generated UUID.
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            source: source.into(),
        }
    }
}

impl From<Document> for Chunk {
    fn from(doc: Document) -> Self {
        Chunk::new(doc.content, doc.source)
    }
}
