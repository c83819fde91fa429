//! # Session
//!
//! Conversation state for one chat: the display transcript and the memory sequence used as
//! conditioning context for retrieval.
//!
//! ## Session
//!
//! Transcript and memory grow in lockstep. The only mutators are
//! [`Session::record_exchange`] (one user turn, one assistant turn and one memory entry) and
//! [`Session::reset`] (clears both), so the two views can never drift apart.
//!
//! ## SessionManager
//!
//! Explicit create / get / reset / destroy lifecycle keyed by session id. Each session sits
//! behind its own `tokio::sync::Mutex`, which serializes turns within a session.

mod manager;
mod types;

pub use manager::SessionManager;
pub use types::{MemoryEntry, Role, Session, Turn};
