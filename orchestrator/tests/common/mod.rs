//! Scripted providers with call counters.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use doc_index::{Chunk, Document, Retriever};
use llm_client::LlmClient;
use prompt::ChatMessage;
use web_search::{SearchResult, WebSearchProvider};

/// Returns scripted replies in order and records each prompt. Fails when the script runs out
/// or when built with [`MockLlm::failing`].
pub struct MockLlm {
    replies: Mutex<VecDeque<String>>,
    fail: bool,
    fail_on_call: Option<usize>,
    pub prompts: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl MockLlm {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            fail: false,
            fail_on_call: None,
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::<String>::new())
        }
    }

    /// Scripted replies, except that call number `call` (1-based) fails.
    pub fn failing_on_call<I, S>(call: usize, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fail_on_call: Some(call),
            ..Self::new(replies)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompt(&self, i: usize) -> String {
        self.prompts.lock().unwrap()[i].clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let prompt = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);
        if self.fail || self.fail_on_call == Some(call) {
            anyhow::bail!("model unavailable");
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted reply left"))
    }
}

/// Returns fixed chunks (or an error) and records the queries it saw.
pub struct MockRetriever {
    chunks: Vec<Chunk>,
    fail: bool,
    pub queries: Mutex<Vec<String>>,
}

impl MockRetriever {
    pub fn with_chunks(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::with_chunks(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Retriever for MockRetriever {
    async fn retrieve(&self, query: &str) -> anyhow::Result<Vec<Chunk>> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            anyhow::bail!("embedding request failed");
        }
        Ok(self.chunks.clone())
    }
}

/// Returns fixed results (or an error, or hangs) and records calls.
pub struct MockSearch {
    results: Vec<SearchResult>,
    fail: bool,
    ignore_cap: bool,
    delay: Option<Duration>,
    pub calls: Mutex<Vec<(String, usize)>>,
}

impl MockSearch {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            fail: false,
            ignore_cap: false,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::with_results(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    /// Returns every result regardless of `max_results`.
    pub fn ignoring_cap(results: Vec<SearchResult>) -> Self {
        Self {
            ignore_cap: true,
            ..Self::with_results(results)
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::empty()
        }
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearchProvider for MockSearch {
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<SearchResult>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            anyhow::bail!("search returned status: 503 Service Unavailable");
        }
        if self.ignore_cap {
            return Ok(self.results.clone());
        }
        Ok(self.results.iter().take(max_results).cloned().collect())
    }
}

pub fn loan_chunks() -> Vec<Chunk> {
    vec![
        Chunk::from(Document::new(
            "Home loans are offered at 8.5% per annum for up to 30 years.",
            "home_loans.txt",
        )),
        Chunk::from(Document::new(
            "Personal loans carry 12.5% interest with tenure up to 5 years.",
            "personal_loans.txt",
        )),
    ]
}

pub fn web_results() -> Vec<SearchResult> {
    vec![
        SearchResult::new("RBI repo rate stands at 6.50%", "https://www.rbi.org.in/repo"),
        SearchResult::new("Banks cut home loan rates", "https://news.example.com/rates"),
    ]
}
