//! Workspace-level error type

use thiserror::Error;

/// Top-level error for the assistant workspace.
///
/// Crate-specific errors (`ConfigError`, `KnowledgeError`, `LlmError`,
/// `AgentError`) convert into this at the workspace seam.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Knowledge error: {0}")]
    Knowledge(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

pub type Result<T> = std::result::Result<T, Error>;
