//! Conversational retrieval QA: optional condense step, retrieval, stuffed-context answer.

use doc_index::{Chunk, Retriever};
use finbuddy_core::{FinBuddyError, Provider, Result};
use llm_client::LlmClient;
use session::MemoryEntry;
use tracing::{debug, instrument};

/// Output of one retrieval-augmented generation call. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalResult {
    pub answer: String,
    pub source_documents: Vec<Chunk>,
}

/// Rewrites `query` into a standalone question when there is prior conversation.
///
/// With empty memory the query is returned unchanged and the model is not called.
pub async fn standalone_question(
    llm: &dyn LlmClient,
    memory: &[MemoryEntry],
    query: &str,
) -> Result<String> {
    if memory.is_empty() {
        return Ok(query.to_string());
    }
    let history = prompt::format_chat_history(
        memory.iter().map(|m| (m.query.as_str(), m.answer.as_str())),
    );
    let condensed = llm
        .complete(&prompt::condense_question_prompt(&history, query))
        .await
        .map_err(|e| FinBuddyError::provider(Provider::Llm, e))?;
    let condensed = condensed.trim();
    if condensed.is_empty() {
        return Ok(query.to_string());
    }
    debug!(standalone = %condensed, "Condensed follow-up question");
    Ok(condensed.to_string())
}

/// Runs retrieval QA for `query` with `memory` as chat history.
///
/// When retrieval finds nothing the answer is left empty and the model is not asked.
#[instrument(skip_all, fields(memory_len = memory.len()))]
pub async fn run_retrieval_qa(
    retriever: &dyn Retriever,
    llm: &dyn LlmClient,
    memory: &[MemoryEntry],
    query: &str,
) -> Result<RetrievalResult> {
    let question = standalone_question(llm, memory, query).await?;

    let source_documents = retriever
        .retrieve(&question)
        .await
        .map_err(|e| FinBuddyError::provider(Provider::Retrieval, e))?;
    if source_documents.is_empty() {
        return Ok(RetrievalResult {
            answer: String::new(),
            source_documents,
        });
    }

    let qa_prompt = prompt::retrieval_qa_prompt(
        source_documents.iter().map(|c| c.content.as_str()),
        &question,
    );
    let answer = llm
        .complete(&qa_prompt)
        .await
        .map_err(|e| FinBuddyError::provider(Provider::Llm, e))?;

    Ok(RetrievalResult {
        answer: answer.trim().to_string(),
        source_documents,
    })
}
