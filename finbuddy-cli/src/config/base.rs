//! Base config: logging, document index locations, web search limits. Loaded from env.

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use doc_index::DEFAULT_TOP_K;
use doc_loader::{
    LoaderConfig, DEFAULT_EMBED_BATCH_SIZE, DEFAULT_EXTERNAL_DOCS, DEFAULT_INTERNAL_DOCS,
    DEFAULT_STORE_PATH,
};
use web_search::{DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_TIMEOUT_SECS};

pub const DEFAULT_LOG_FILE: &str = "logs/finbuddy.log";

/// Settings that need no credentials. `emi` and `rates` run on this alone.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// LOG_FILE
    pub log_file: String,
    /// FAISS_STORE_PATH or INDEX_STORE_PATH
    pub store_path: PathBuf,
    /// INTERNAL_DOCS_PATH
    pub internal_docs: PathBuf,
    /// EXTERNAL_DOCS_PATH
    pub external_docs: PathBuf,
    /// EMBED_BATCH_SIZE: documents per embedding request during index rebuilds
    pub embed_batch_size: usize,
    /// RETRIEVAL_TOP_K
    pub top_k: usize,
    /// SEARCH_MAX_RESULTS
    pub search_max_results: usize,
    /// SEARCH_TIMEOUT_SECS
    pub search_timeout_secs: u64,
    /// SEARCH_BASE_URL; DuckDuckGo's public endpoint when unset.
    pub search_base_url: Option<String>,
    /// TRUST_DENY_PHRASES, `|`-separated; the built-in list when unset.
    pub deny_phrases: Option<Vec<String>>,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl BaseConfig {
    /// Load from environment variables. Unset or unparsable values fall back to defaults.
    pub fn load() -> Result<Self> {
        let store_path = env::var("FAISS_STORE_PATH")
            .or_else(|_| env::var("INDEX_STORE_PATH"))
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string());
        let deny_phrases = env::var("TRUST_DENY_PHRASES")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.split('|')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            });

        Ok(Self {
            log_file: env_or("LOG_FILE", DEFAULT_LOG_FILE),
            store_path: PathBuf::from(store_path),
            internal_docs: PathBuf::from(env_or("INTERNAL_DOCS_PATH", DEFAULT_INTERNAL_DOCS)),
            external_docs: PathBuf::from(env_or("EXTERNAL_DOCS_PATH", DEFAULT_EXTERNAL_DOCS)),
            embed_batch_size: env_parse("EMBED_BATCH_SIZE", DEFAULT_EMBED_BATCH_SIZE),
            top_k: env_parse("RETRIEVAL_TOP_K", DEFAULT_TOP_K),
            search_max_results: env_parse("SEARCH_MAX_RESULTS", DEFAULT_MAX_RESULTS),
            search_timeout_secs: env_parse("SEARCH_TIMEOUT_SECS", DEFAULT_SEARCH_TIMEOUT_SECS),
            search_base_url: env::var("SEARCH_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            deny_phrases,
        })
    }

    /// Validate config (positive limits, valid search URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.embed_batch_size == 0 {
            anyhow::bail!("EMBED_BATCH_SIZE must be at least 1");
        }
        if self.top_k == 0 {
            anyhow::bail!("RETRIEVAL_TOP_K must be at least 1");
        }
        if self.search_max_results == 0 {
            anyhow::bail!("SEARCH_MAX_RESULTS must be at least 1");
        }
        if self.search_timeout_secs == 0 {
            anyhow::bail!("SEARCH_TIMEOUT_SECS must be at least 1");
        }
        if let Some(ref url_str) = self.search_base_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("SEARCH_BASE_URL is set but not a valid URL: {}", url_str);
            }
        }
        if matches!(self.deny_phrases, Some(ref p) if p.is_empty()) {
            anyhow::bail!("TRUST_DENY_PHRASES is set but contains no phrases");
        }
        Ok(())
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            store_path: self.store_path.clone(),
            internal_docs: self.internal_docs.clone(),
            external_docs: self.external_docs.clone(),
            batch_size: self.embed_batch_size,
        }
    }
}
