//! Core types for the merchant assistant
//!
//! This crate provides the foundational types used across all other crates:
//! - Chat message types for the LLM boundary
//! - Conversation turn types
//! - User profile classification
//! - The workspace-level error type

pub mod conversation;
pub mod error;
pub mod message;
pub mod profile;

pub use conversation::{Turn, TurnRole};
pub use error::{Error, Result};
pub use message::{Message, Role};
pub use profile::UserProfile;
