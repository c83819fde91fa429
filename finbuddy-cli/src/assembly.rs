//! Assembly: builds providers from config and wires them into the orchestrator.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use doc_index::{Retriever, VectorRetriever};
use doc_loader::{load_or_rebuild, LoadOutcome};
use embedding::EmbeddingService;
use finbuddy_core::FinBuddyError;
use llm_client::{LlmClient, LlmConfig, OpenAILlmClient};
use openai_embedding::OpenAIEmbedding;
use orchestrator::{Orchestrator, TrustPolicy};
use tracing::{info, warn};
use web_search::{DuckDuckGoSearch, WebSearchProvider};

use crate::config::{AppConfig, BaseConfig};

/// Builds the chat model client. The system prompt is only sent when configured.
pub fn build_llm(config: &AppConfig) -> Arc<dyn LlmClient> {
    let llm_cfg = &config.llm;
    if let Some(s) = llm_cfg.system_prompt() {
        let prefix: String = s.chars().take(50).collect();
        info!(len = s.len(), prefix = %prefix, "Using custom system prompt from env");
    }
    Arc::new(
        OpenAILlmClient::with_base_url(
            llm_cfg.api_key().to_string(),
            llm_cfg.base_url().to_string(),
        )
        .with_model(llm_cfg.model().to_string())
        .with_temperature(Some(llm_cfg.temperature()))
        .with_timeout(Duration::from_secs(llm_cfg.timeout_secs()))
        .with_system_prompt_opt(llm_cfg.system_prompt().map(String::from)),
    )
}

pub fn build_embedder(config: &AppConfig) -> Arc<dyn EmbeddingService> {
    Arc::new(OpenAIEmbedding::from_config(&config.embedding))
}

pub fn build_search(base: &BaseConfig) -> Result<Arc<dyn WebSearchProvider>> {
    let timeout = Duration::from_secs(base.search_timeout_secs);
    let search = match &base.search_base_url {
        Some(url) => DuckDuckGoSearch::with_base_url(url, timeout)?,
        None => DuckDuckGoSearch::new(timeout)?,
    };
    Ok(Arc::new(search))
}

/// Loads (or rebuilds) the document index and wraps it in a retriever.
///
/// Returns `None` when no index can be produced; the caller then runs web-search-only.
pub async fn load_retriever(
    base: &BaseConfig,
    embedder: Arc<dyn EmbeddingService>,
) -> Option<Arc<dyn Retriever>> {
    match load_or_rebuild(&base.loader_config(), embedder.as_ref()).await {
        Ok((index, outcome)) => {
            info!(
                chunks = index.len(),
                rebuilt = outcome == LoadOutcome::Rebuilt,
                "Document index ready"
            );
            let retriever: Arc<dyn Retriever> = Arc::new(
                VectorRetriever::new(Arc::new(index), embedder).with_top_k(base.top_k),
            );
            Some(retriever)
        }
        Err(e) => {
            let err = FinBuddyError::from(e);
            warn!(error = %err, "Continuing in web-search-only mode");
            None
        }
    }
}

/// Builds every provider and the orchestrator. Index problems degrade to web-only mode.
pub async fn build_orchestrator(config: &AppConfig) -> Result<Orchestrator> {
    let llm = build_llm(config);
    let embedder = build_embedder(config);
    let search = build_search(config.base()).context("Build web search client")?;
    let retriever = load_retriever(config.base(), embedder).await;

    let base = config.base();
    let policy = match &base.deny_phrases {
        Some(phrases) => TrustPolicy::new(phrases),
        None => TrustPolicy::default(),
    };
    info!(
        model = %config.llm.model(),
        web_only = retriever.is_none(),
        max_results = base.search_max_results,
        "Orchestrator assembled"
    );

    Ok(Orchestrator::new(retriever, llm, search)
        .with_policy(policy)
        .with_max_results(base.search_max_results)
        .with_search_timeout(Duration::from_secs(base.search_timeout_secs)))
}
