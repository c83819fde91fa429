//! DuckDuckGo HTML search client.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::parse::parse_results;
use crate::{SearchResult, WebSearchProvider};

pub const DEFAULT_BASE_URL: &str = "https://html.duckduckgo.com";
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 15;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// [`WebSearchProvider`] backed by DuckDuckGo's HTML results page.
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    base_url: String,
}

impl DuckDuckGoSearch {
    /// Client against the public endpoint with the given per-request timeout.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Client against another base URL (tests, proxies). Trailing slashes are ignored.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("build web search HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!("{}/html/?q={}", self.base_url, urlencoding::encode(query))
    }
}

#[async_trait]
impl WebSearchProvider for DuckDuckGoSearch {
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, anyhow::Error> {
        if max_results == 0 {
            return Ok(Vec::new());
        }
        let url = self.search_url(query);
        info!("step: web search DuckDuckGo request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("DuckDuckGo request failed")?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "DuckDuckGo returned non-success status");
            anyhow::bail!("DuckDuckGo returned status: {}", status);
        }

        let html = response
            .text()
            .await
            .context("read DuckDuckGo response body")?;
        let mut results = parse_results(&html);
        results.truncate(max_results);

        info!(count = results.len(), "step: web search DuckDuckGo done");
        Ok(results)
    }
}
