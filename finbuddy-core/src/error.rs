use std::fmt;

use thiserror::Error;

/// External collaborator that failed during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Embedding,
    Retrieval,
    Llm,
    WebSearch,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Embedding => "embedding",
            Provider::Retrieval => "retrieval",
            Provider::Llm => "llm",
            Provider::WebSearch => "web search",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum FinBuddyError {
    /// Missing or invalid configuration. Fatal at startup.
    #[error("Config error: {0}")]
    Config(String),

    /// Persisted index missing or corrupt. The orchestrator degrades to web-search-only mode.
    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    /// A provider call failed for the current turn.
    #[error("{provider} provider error: {message}")]
    Provider { provider: Provider, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FinBuddyError {
    /// Wraps any provider failure; the full `anyhow` chain is kept in the message.
    pub fn provider(provider: Provider, err: impl fmt::Display) -> Self {
        FinBuddyError::Provider {
            provider,
            message: format!("{:#}", err),
        }
    }

    /// True for errors that only affect the current turn.
    pub fn is_turn_scoped(&self) -> bool {
        matches!(self, FinBuddyError::Provider { .. })
    }
}

pub type Result<T> = std::result::Result<T, FinBuddyError>;
