//! Conversation state and response orchestration
//!
//! Ties the understanding pipeline together: language detection updates the
//! session language when confident, intents are classified and accumulated,
//! the knowledge store is queried with context-derived filters, and the
//! assembled prompt goes to the LLM collaborator. All failures past
//! construction degrade to a response; only configuration errors are fatal.

pub mod context;
pub mod orchestrator;

pub use context::ConversationContext;
pub use orchestrator::{OrchestratorConfig, ResponseOrchestrator, APOLOGY, HISTORY_WINDOW};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<AgentError> for assistant_core::Error {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Configuration(msg) => assistant_core::Error::Configuration(msg),
        }
    }
}
