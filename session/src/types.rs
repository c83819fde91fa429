use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

/// One displayed message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// One accepted (query, answer) pair, fed back as chat history on later turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub query: String,
    pub answer: String,
}

/// State of a single conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    transcript: Vec<Turn>,
    memory: Vec<MemoryEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            transcript: Vec::new(),
            memory: Vec::new(),
        }
    }

    /// Appends the user turn, the assistant turn and the memory entry for one accepted query.
    pub fn record_exchange(&mut self, query: impl Into<String>, answer: impl Into<String>) {
        let query = query.into();
        let answer = answer.into();
        self.transcript.push(Turn {
            role: Role::User,
            content: query.clone(),
        });
        self.transcript.push(Turn {
            role: Role::Assistant,
            content: answer.clone(),
        });
        self.memory.push(MemoryEntry { query, answer });
    }

    /// Clears transcript and memory together. The id and creation time are kept.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.memory.clear();
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn memory(&self) -> &[MemoryEntry] {
        &self.memory
    }

    /// Number of accepted exchanges (one per memory entry).
    pub fn turn_count(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert!(session.is_empty());
        assert_eq!(session.turn_count(), 0);
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_record_exchange_orders_turns() {
        let mut session = Session::new();
        session.record_exchange("What is EMI?", "Equated monthly instalment.");

        assert_eq!(
            session.transcript(),
            &[
                Turn {
                    role: Role::User,
                    content: "What is EMI?".to_string()
                },
                Turn {
                    role: Role::Assistant,
                    content: "Equated monthly instalment.".to_string()
                },
            ]
        );
        assert_eq!(
            session.memory(),
            &[MemoryEntry {
                query: "What is EMI?".to_string(),
                answer: "Equated monthly instalment.".to_string()
            }]
        );
    }

    #[test]
    fn test_reset_keeps_identity() {
        let mut session = Session::new();
        let id = session.id;
        session.record_exchange("q", "a");
        session.reset();
        assert_eq!(session.id, id);
        assert!(session.is_empty());
        assert!(session.transcript().is_empty());
    }
}
