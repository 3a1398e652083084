//! LLM collaborator boundary
//!
//! The external language model behind the [`ChatBackend`] trait: an ordered
//! list of role-tagged messages in, generated text out. One blocking call per
//! turn as seen by the caller; no internal retries or multiplexing. The
//! [`PromptBuilder`] assembles the message sequence (persona, retrieval
//! context, bounded history, user turn).

pub mod backend;
pub mod prompt;

pub use backend::{ChatBackend, Completion, FinishReason, LlmConfig, OpenAiBackend};
pub use prompt::PromptBuilder;

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

impl From<LlmError> for assistant_core::Error {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Configuration(msg) => assistant_core::Error::Configuration(msg),
            other => assistant_core::Error::Llm(other.to_string()),
        }
    }
}
