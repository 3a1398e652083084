//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation
    #[default]
    Development,
    /// Staging mode
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Language detection configuration
    #[serde(default)]
    pub language: LanguageSettings,

    /// LLM collaborator configuration
    #[serde(default)]
    pub llm: LlmSettings,

    /// Knowledge store / similarity engine configuration
    #[serde(default)]
    pub knowledge: KnowledgeSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Language detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSettings {
    /// Default language when detection has no signal
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Supported language codes, in profile declaration order
    #[serde(default = "default_supported")]
    pub supported: Vec<String>,
    /// Detector confidence required to switch the session language
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_supported() -> Vec<String> {
    vec!["pt-BR".to_string(), "en".to_string(), "es".to_string()]
}

fn default_confidence_threshold() -> f32 {
    0.6
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            supported: default_supported(),
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

/// LLM collaborator configuration.
///
/// These knobs are passed through to the backend opaquely; the core never
/// interprets them beyond range validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// OpenAI-compatible API endpoint
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    /// API key; required for remote endpoints
    #[serde(default)]
    pub api_key: String,
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_llm_endpoint() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_max_tokens() -> usize {
    2000
}

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            api_key: String::new(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Knowledge store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSettings {
    /// Similarity engine endpoint (Qdrant)
    #[serde(default = "default_knowledge_endpoint")]
    pub endpoint: String,
    /// Collection name
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Embedding dimension the engine was created with
    #[serde(default = "default_vector_dim")]
    pub vector_dim: usize,
    /// API key (optional)
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_knowledge_endpoint() -> String {
    "http://localhost:6334".to_string()
}

fn default_collection() -> String {
    "assistant_knowledge".to_string()
}

fn default_vector_dim() -> usize {
    384
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            endpoint: default_knowledge_endpoint(),
            collection: default_collection(),
            vector_dim: default_vector_dim(),
            api_key: None,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.language.confidence_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "language.confidence_threshold".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    self.language.confidence_threshold
                ),
            });
        }

        if !self
            .language
            .supported
            .iter()
            .any(|l| l == &self.language.default_language)
        {
            return Err(ConfigError::InvalidValue {
                field: "language.default_language".to_string(),
                message: format!(
                    "'{}' is not in the supported language list",
                    self.language.default_language
                ),
            });
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", self.llm.temperature),
            });
        }

        if self.llm.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.max_tokens".to_string(),
                message: "Must be greater than zero".to_string(),
            });
        }

        if self.knowledge.vector_dim == 0 {
            return Err(ConfigError::InvalidValue {
                field: "knowledge.vector_dim".to_string(),
                message: "Must be greater than zero".to_string(),
            });
        }

        // Soft warning only: local endpoints work without a key, and the LLM
        // backend rejects a missing key for remote endpoints at construction.
        if self.environment.is_production() && self.llm.api_key.is_empty() {
            tracing::warn!("llm.api_key not configured (required for remote endpoints)");
        }

        Ok(())
    }
}

/// Load settings from files and environment.
///
/// Priority: env vars > `config/{env}.yaml` > `config/default.yaml` > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder().add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    let config = builder
        .add_source(
            Environment::with_prefix("ASSISTANT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.language.default_language, "en");
        assert_eq!(settings.language.confidence_threshold, 0.6);
        assert_eq!(settings.server.port, 8080);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut settings = Settings::default();
        settings.language.confidence_threshold = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unsupported_default_language() {
        let mut settings = Settings::default();
        settings.language.default_language = "fr".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        let mut settings = Settings::default();
        settings.llm.temperature = 3.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_from_yaml() {
        let yaml = r#"
environment: production
server:
  port: 9000
language:
  default_language: pt-BR
llm:
  model: llama3-70b-8192
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.environment, RuntimeEnvironment::Production);
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.language.default_language, "pt-BR");
        assert_eq!(settings.llm.model, "llama3-70b-8192");
        // Unset sections keep their defaults
        assert_eq!(settings.llm.max_tokens, 2000);
    }
}
