//! Web search escalation and resynthesis.

use std::time::Duration;

use finbuddy_core::{FinBuddyError, Provider, Result};
use llm_client::LlmClient;
use prompt::{format_search_line, resynthesis_prompt, NO_LIVE_DATA};
use tracing::{debug, info, instrument};
use web_search::{SearchResult, WebSearchProvider};

/// Joins results as `{snippet} (Source: {url})` lines, or [`NO_LIVE_DATA`] when there are none.
pub fn format_search_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_LIVE_DATA.to_string();
    }
    results
        .iter()
        .map(|r| format_search_line(&r.snippet, &r.source_url))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Searches the web for `query` and asks the model to rewrite the hits as the final answer.
#[instrument(skip(search, llm, query), fields(query_len = query.len()))]
pub async fn search_and_resynthesize(
    search: &dyn WebSearchProvider,
    llm: &dyn LlmClient,
    query: &str,
    max_results: usize,
    search_timeout: Duration,
) -> Result<String> {
    let results = tokio::time::timeout(search_timeout, search.search(query, max_results))
        .await
        .map_err(|_| {
            FinBuddyError::provider(
                Provider::WebSearch,
                format!("timed out after {}s", search_timeout.as_secs_f32()),
            )
        })?
        .map_err(|e| FinBuddyError::provider(Provider::WebSearch, e))?;
    let mut results = results;
    if results.len() > max_results {
        debug!(
            returned = results.len(),
            max_results, "Search provider exceeded result cap; truncating"
        );
        results.truncate(max_results);
    }
    info!(state = "WebSearchDone", results = results.len(), "Web search finished");

    let raw_info = format_search_results(&results);
    let reply = llm
        .complete(&resynthesis_prompt(query, &raw_info))
        .await
        .map_err(|e| FinBuddyError::provider(Provider::Llm, e))?;
    Ok(reply.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_search_results_joins_lines() {
        let results = vec![
            SearchResult::new("Repo rate is 6.5%", "https://rbi.org.in"),
            SearchResult::new("Home loans from 8.4%", "https://bank.example.com"),
        ];
        assert_eq!(
            format_search_results(&results),
            "Repo rate is 6.5% (Source: https://rbi.org.in)\n\
             Home loans from 8.4% (Source: https://bank.example.com)"
        );
    }

    #[test]
    fn test_format_search_results_empty() {
        assert_eq!(format_search_results(&[]), "No live data found.");
    }
}
