//! Heuristic trust check on retrieval answers.

use std::fmt;

use doc_index::Chunk;

/// Phrases that mark a retrieval answer as a non-answer, checked in this order.
pub const DEFAULT_DENY_PHRASES: &[&str] = &[
    "i don't know",
    "cannot answer",
    "doesn't specify",
    "not specified",
    "no information",
    "no details provided",
    "i'm sorry, but i don't have",
    "sorry, but i don't have",
    "sorry, i don't have",
    "no data available",
    "cannot find",
];

/// Why a query went to web search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscalationReason {
    /// No index is loaded.
    NoRetriever,
    /// Retrieval returned no chunks.
    NoSources,
    /// The model produced a blank answer.
    EmptyAnswer,
    /// The answer contains this deny-list phrase.
    DenyPhrase(String),
}

impl fmt::Display for EscalationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscalationReason::NoRetriever => f.write_str("no retriever"),
            EscalationReason::NoSources => f.write_str("no source documents"),
            EscalationReason::EmptyAnswer => f.write_str("empty answer"),
            EscalationReason::DenyPhrase(p) => write!(f, "deny phrase \"{}\"", p),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Trusted,
    Untrusted(EscalationReason),
}

impl Verdict {
    pub fn is_trusted(&self) -> bool {
        matches!(self, Verdict::Trusted)
    }
}

/// Ordered set of lowercase deny phrases matched by case-insensitive substring containment.
///
/// English only; answers in other languages never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustPolicy {
    deny_phrases: Vec<String>,
}

impl TrustPolicy {
    /// Policy with custom phrases. Phrases are lowercased; blank ones are dropped since they
    /// would match every answer.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            deny_phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn deny_phrases(&self) -> &[String] {
        &self.deny_phrases
    }

    /// First matching deny phrase, if any.
    pub fn matching_phrase(&self, answer: &str) -> Option<&str> {
        let lowered = answer.to_lowercase();
        self.deny_phrases
            .iter()
            .find(|p| lowered.contains(p.as_str()))
            .map(String::as_str)
    }

    /// Untrusted when there are no sources, the answer is blank, or a deny phrase matches;
    /// the first failing check is reported.
    pub fn evaluate(&self, answer: &str, sources: &[Chunk]) -> Verdict {
        if sources.is_empty() {
            return Verdict::Untrusted(EscalationReason::NoSources);
        }
        if answer.trim().is_empty() {
            return Verdict::Untrusted(EscalationReason::EmptyAnswer);
        }
        match self.matching_phrase(answer) {
            Some(phrase) => Verdict::Untrusted(EscalationReason::DenyPhrase(phrase.to_string())),
            None => Verdict::Trusted,
        }
    }
}

impl Default for TrustPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DENY_PHRASES)
    }
}
