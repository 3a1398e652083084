//! Session management
//!
//! Per-session conversation contexts keyed by opaque UUID in a concurrent
//! map. Each context sits behind its own async mutex so one turn is handled
//! start-to-finish before the next is accepted for that session; sessions
//! are otherwise independent and process concurrently.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use assistant_agent::ConversationContext;

/// Shared handle to one session's context
pub type SessionHandle = Arc<Mutex<ConversationContext>>;

/// Concurrent session store
pub struct SessionManager {
    sessions: DashMap<String, SessionHandle>,
    default_language: String,
}

impl SessionManager {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            default_language: default_language.into(),
        }
    }

    /// Create a session and return its id.
    pub fn create(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        let context = ConversationContext::new(session_id.clone(), self.default_language.clone());
        self.sessions
            .insert(session_id.clone(), Arc::new(Mutex::new(context)));

        tracing::info!(session = %session_id, "Session created");
        session_id
    }

    /// Get a session handle by id.
    pub fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.get(session_id).map(|entry| entry.value().clone())
    }

    /// End a session. After removal no further mutation is possible.
    pub fn end(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            tracing::info!(session = %session_id, "Session ended");
        }
        removed
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let manager = SessionManager::new("en");
        let id = manager.create();

        let handle = manager.get(&id).expect("session exists");
        let context = handle.lock().await;
        assert_eq!(context.session_id, id);
        assert_eq!(context.language, "en");
        assert!(context.conversation_history.is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let manager = SessionManager::new("en");
        let a = manager.create();
        let b = manager.create();
        assert_ne!(a, b);
        assert_eq!(manager.len(), 2);

        manager.get(&a).unwrap().lock().await.language = "pt-BR".to_string();
        assert_eq!(manager.get(&b).unwrap().lock().await.language, "en");
    }

    #[test]
    fn test_end_removes_session() {
        let manager = SessionManager::new("en");
        let id = manager.create();

        assert!(manager.end(&id));
        assert!(manager.get(&id).is_none());
        assert!(!manager.end(&id));
        assert!(manager.is_empty());
    }
}
