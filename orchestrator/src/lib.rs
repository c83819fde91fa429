//! # Orchestrator
//!
//! Answers one user query per call: retrieval-augmented generation over the local document
//! index first, then live web search plus resynthesis when the local answer is not trusted.
//!
//! ## Flow
//!
//! ```text
//! RetrievalAttempted -> TrustedReturn
//! RetrievalAttempted -> Escalated -> WebSearchDone -> ResynthesizedReturn
//! ```
//!
//! Each state is logged as `state = ...`. A successful turn is recorded into the session;
//! any provider failure is returned and leaves the session untouched.
//!
//! ## External Interactions
//!
//! - **LLM**: condense, retrieval QA and resynthesis prompts via [`LlmClient`]
//! - **Document index**: [`Retriever`] (absent when the index could not be loaded)
//! - **Web**: [`WebSearchProvider`]

mod fallback;
mod retrieval;
mod trust;

pub use fallback::{format_search_results, search_and_resynthesize};
pub use retrieval::{run_retrieval_qa, standalone_question, RetrievalResult};
pub use trust::{EscalationReason, TrustPolicy, Verdict, DEFAULT_DENY_PHRASES};

use std::sync::Arc;
use std::time::Duration;

use doc_index::{Chunk, Retriever};
use finbuddy_core::Result;
use llm_client::LlmClient;
use session::Session;
use tracing::{info, instrument, warn};
use web_search::{WebSearchProvider, DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_TIMEOUT_SECS};

/// Which path produced an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerRoute {
    /// Retrieval answer passed the trust check.
    Trusted,
    /// Answer came from web search resynthesis.
    Escalated(EscalationReason),
}

/// Final answer for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub route: AnswerRoute,
    /// Chunks the retrieval step returned; kept on escalation for display.
    pub sources: Vec<Chunk>,
}

impl Answer {
    pub fn is_escalated(&self) -> bool {
        matches!(self.route, AnswerRoute::Escalated(_))
    }
}

pub struct Orchestrator {
    retriever: Option<Arc<dyn Retriever>>,
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn WebSearchProvider>,
    policy: TrustPolicy,
    max_results: usize,
    search_timeout: Duration,
}

impl Orchestrator {
    /// `retriever` is `None` in web-search-only mode.
    pub fn new(
        retriever: Option<Arc<dyn Retriever>>,
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn WebSearchProvider>,
    ) -> Self {
        if retriever.is_none() {
            warn!("No document index available; every query will use web search");
        }
        Self {
            retriever,
            llm,
            search,
            policy: TrustPolicy::default(),
            max_results: DEFAULT_MAX_RESULTS,
            search_timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
        }
    }

    pub fn with_policy(mut self, policy: TrustPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub fn has_retriever(&self) -> bool {
        self.retriever.is_some()
    }

    pub fn policy(&self) -> &TrustPolicy {
        &self.policy
    }

    /// Answers `query` using the session's memory as context, then records the exchange.
    #[instrument(skip(self, session, query), fields(session_id = %session.id, memory_len = session.memory().len()))]
    pub async fn answer(&self, session: &mut Session, query: &str) -> Result<Answer> {
        info!(state = "RetrievalAttempted", "Answering query");

        let (verdict, sources, local_answer) = match &self.retriever {
            Some(retriever) => {
                let result = run_retrieval_qa(
                    retriever.as_ref(),
                    self.llm.as_ref(),
                    session.memory(),
                    query,
                )
                .await?;
                let verdict = self.policy.evaluate(&result.answer, &result.source_documents);
                (verdict, result.source_documents, result.answer)
            }
            None => (
                Verdict::Untrusted(EscalationReason::NoRetriever),
                Vec::new(),
                String::new(),
            ),
        };

        let answer = match verdict {
            Verdict::Trusted => {
                info!(state = "TrustedReturn", sources = sources.len(), "Retrieval answer trusted");
                Answer {
                    text: local_answer,
                    route: AnswerRoute::Trusted,
                    sources,
                }
            }
            Verdict::Untrusted(reason) => {
                info!(state = "Escalated", reason = %reason, "Falling back to web search");
                let text = search_and_resynthesize(
                    self.search.as_ref(),
                    self.llm.as_ref(),
                    query,
                    self.max_results,
                    self.search_timeout,
                )
                .await?;
                info!(state = "ResynthesizedReturn", "Web answer ready");
                Answer {
                    text,
                    route: AnswerRoute::Escalated(reason),
                    sources,
                }
            }
        };

        session.record_exchange(query, answer.text.clone());
        Ok(answer)
    }
}
