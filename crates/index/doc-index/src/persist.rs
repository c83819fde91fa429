//! On-disk format: a store directory holding two JSON artifacts.
//!
//! - `index.json`: embedding model, dimension, build time, and one vector per chunk id
//! - `docstore.json`: chunk ids, contents and sources
//!
//! Both must exist and agree on the id sequence for a load to succeed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::IndexError;
use crate::store::DocIndex;
use crate::types::Chunk;

pub const INDEX_FILE: &str = "index.json";
pub const DOCSTORE_FILE: &str = "docstore.json";

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct IndexArtifact {
    version: u32,
    embedding_model: String,
    dimension: usize,
    built_at: DateTime<Utc>,
    ids: Vec<Uuid>,
    vectors: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DocstoreArtifact {
    chunks: Vec<Chunk>,
}

/// True when both artifacts exist under `dir`.
pub fn artifacts_exist(dir: &Path) -> bool {
    dir.join(INDEX_FILE).is_file() && dir.join(DOCSTORE_FILE).is_file()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IndexError> {
    if !path.is_file() {
        return Err(IndexError::MissingArtifact(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| IndexError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `value` to a sibling temp file and renames it over `path`.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IndexError> {
    let json = serde_json::to_string(value).map_err(|source| IndexError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp: PathBuf = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl DocIndex {
    /// Saves both artifacts into `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<(), IndexError> {
        fs::create_dir_all(dir)?;
        let index = IndexArtifact {
            version: FORMAT_VERSION,
            embedding_model: self.embedding_model().to_string(),
            dimension: self.dimension(),
            built_at: Utc::now(),
            ids: self.chunks().iter().map(|c| c.id).collect(),
            vectors: self.vectors().to_vec(),
        };
        let docstore = DocstoreArtifact {
            chunks: self.chunks().to_vec(),
        };
        write_json(&dir.join(DOCSTORE_FILE), &docstore)?;
        write_json(&dir.join(INDEX_FILE), &index)?;
        info!(
            path = %dir.display(),
            chunks = self.len(),
            dimension = self.dimension(),
            "Document index saved"
        );
        Ok(())
    }

    /// Loads both artifacts from `dir`.
    ///
    /// Fails on a missing or unparsable artifact, an unknown format version, or when the
    /// docstore ids do not match the index ids one-to-one in order.
    pub fn load(dir: &Path) -> Result<Self, IndexError> {
        let index: IndexArtifact = read_json(&dir.join(INDEX_FILE))?;
        let docstore: DocstoreArtifact = read_json(&dir.join(DOCSTORE_FILE))?;

        if index.version != FORMAT_VERSION {
            return Err(IndexError::Inconsistent(format!(
                "unsupported index format version {}",
                index.version
            )));
        }
        if index.vectors.len() != index.ids.len() {
            return Err(IndexError::Inconsistent(format!(
                "{} ids but {} vectors",
                index.ids.len(),
                index.vectors.len()
            )));
        }
        let docstore_ids: Vec<Uuid> = docstore.chunks.iter().map(|c| c.id).collect();
        if docstore_ids != index.ids {
            return Err(IndexError::Inconsistent(
                "docstore ids do not match index ids".to_string(),
            ));
        }

        let mut loaded = DocIndex::new(index.embedding_model, index.dimension);
        for (chunk, vector) in docstore.chunks.into_iter().zip(index.vectors) {
            loaded.add(chunk, vector)?;
        }
        debug!(built_at = %index.built_at, "Index artifact metadata");
        info!(
            path = %dir.display(),
            chunks = loaded.len(),
            model = %loaded.embedding_model(),
            "Document index loaded"
        );
        Ok(loaded)
    }
}
