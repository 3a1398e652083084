//! Configuration management for the merchant assistant
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, `config/{env}.yaml`)
//! - Environment variables (`ASSISTANT__` prefix, `__` separator)
//!
//! Settings are validated once at startup; the rest of the workspace
//! consumes them as plain values.

pub mod brand;
pub mod settings;

pub use brand::{BrandProfile, ProductBlurb};
pub use settings::{
    load_settings, KnowledgeSettings, LanguageSettings, LlmSettings, RuntimeEnvironment,
    ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
