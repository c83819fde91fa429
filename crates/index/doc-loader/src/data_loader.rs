//! Reads `.txt` documents from dataset folders.

use std::path::Path;

use doc_index::{Document, IndexError};
use tracing::debug;

/// Loads every `*.txt` file directly inside `folder` as one [`Document`].
///
/// `source` is the file name. Files are returned sorted by name. Subdirectories and other
/// extensions are skipped; a missing folder or a non-UTF-8 file is an error.
pub async fn load_text_folder(folder: &Path) -> Result<Vec<Document>, IndexError> {
    let mut entries = tokio::fs::read_dir(folder).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_txt = path.extension().map(|e| e == "txt").unwrap_or(false);
        if is_txt && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut docs = Vec::with_capacity(files.len());
    for path in files {
        let content = tokio::fs::read_to_string(&path).await?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(source = %source, bytes = content.len(), "Loaded document");
        docs.push(Document::new(content, source));
    }
    Ok(docs)
}

/// Internal documents followed by external documents.
pub async fn load_all_datasets(
    internal: &Path,
    external: &Path,
) -> Result<Vec<Document>, IndexError> {
    let mut docs = load_text_folder(internal).await?;
    docs.extend(load_text_folder(external).await?);
    Ok(docs)
}
