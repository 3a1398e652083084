//! Per-session conversation state
//!
//! Owned exclusively by the session; the orchestrator borrows it for one
//! call and never retains it. History only grows through paired
//! user/assistant appends.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use assistant_core::{Turn, UserProfile};
use assistant_language::IntentKind;

/// Conversation state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Opaque session id assigned by the host
    pub session_id: String,
    /// Current language; starts at the process default, updated only on
    /// confident detection
    pub language: String,
    /// User profile for personalization
    pub user_profile: UserProfile,
    /// Product the conversation is currently about, if any
    pub current_product: Option<String>,
    /// Ordered message history; grows only by paired appends
    pub conversation_history: Vec<Turn>,
    /// Intents accumulated over the session, in detection order
    pub detected_intents: Vec<IntentKind>,
    /// Free-form metadata
    pub metadata: HashMap<String, String>,
    /// Session creation time
    pub created_at: DateTime<Utc>,
    /// Last turn time
    pub last_interaction: DateTime<Utc>,
}

impl ConversationContext {
    /// Create a fresh context in the given default language.
    pub fn new(session_id: impl Into<String>, default_language: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            language: default_language.into(),
            user_profile: UserProfile::default(),
            current_product: None,
            conversation_history: Vec::new(),
            detected_intents: Vec::new(),
            metadata: HashMap::new(),
            created_at: now,
            last_interaction: now,
        }
    }

    /// Append one user/assistant pair and refresh the interaction time.
    ///
    /// This is the only mutation point for history, which keeps the
    /// paired-append invariant in one place.
    pub fn record_exchange(&mut self, user_input: &str, reply: &str) {
        self.conversation_history.push(Turn::user(user_input));
        self.conversation_history.push(Turn::assistant(reply));
        self.last_interaction = Utc::now();
    }

    /// Accumulate the intents detected for one turn.
    pub fn record_intents(&mut self, intents: &[IntentKind]) {
        self.detected_intents.extend_from_slice(intents);
    }

    /// Number of history entries (turns, not exchanges).
    pub fn turn_count(&self) -> usize {
        self.conversation_history.len()
    }
}
