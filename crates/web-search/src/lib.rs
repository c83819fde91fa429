//! # Web search
//!
//! The [`WebSearchProvider`] seam used for escalation, and [`DuckDuckGoSearch`], which
//! queries DuckDuckGo's HTML endpoint (no API key) and extracts `(snippet, url)` pairs.
//!
//! ## External Interactions
//!
//! - **DuckDuckGo**: HTTPS GET to `https://html.duckduckgo.com/html/?q=...`

mod duckduckgo;
mod parse;

pub use duckduckgo::{DuckDuckGoSearch, DEFAULT_BASE_URL, DEFAULT_SEARCH_TIMEOUT_SECS};
pub use parse::parse_results;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Number of web results used for resynthesis unless configured otherwise.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// One web hit: the text shown to the model and the page it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub snippet: String,
    pub source_url: String,
}

impl SearchResult {
    pub fn new(snippet: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            snippet: snippet.into(),
            source_url: source_url.into(),
        }
    }
}

/// Given a query, returns at most `max_results` hits in ranked order.
///
/// An empty list is a valid answer, not an error.
#[async_trait]
pub trait WebSearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchResult>, anyhow::Error>;
}
