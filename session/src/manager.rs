use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::Session;

/// Owns every live session. Cloning shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session and returns its handle.
    pub async fn create(&self) -> Arc<Mutex<Session>> {
        let session = Session::new();
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&handle));
        info!(session_id = %id, "Session created");
        handle
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Clears the session's transcript and memory. Waits for an in-flight turn to finish.
    /// Returns `false` when the id is unknown.
    pub async fn reset(&self, id: Uuid) -> bool {
        let Some(handle) = self.get(id).await else {
            debug!(session_id = %id, "Reset of unknown session");
            return false;
        };
        handle.lock().await.reset();
        info!(session_id = %id, "Session reset");
        true
    }

    /// Removes the session. Outstanding handles stay usable but are no longer reachable by id.
    pub async fn destroy(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session destroyed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
