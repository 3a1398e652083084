//! LLM backend implementations
//!
//! OpenAI-compatible chat completions over HTTP (Groq, OpenAI, and local
//! servers speak the same protocol). The backend performs exactly one
//! request per `generate` call; a failed or slow call surfaces as an error
//! for the orchestrator to degrade on. Timeout enforcement is the HTTP
//! client's; retry policy belongs to no one here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use assistant_config::LlmSettings;
use assistant_core::{Message, Role};

use crate::LlmError;

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible API endpoint (e.g. `https://api.groq.com/openai/v1`)
    pub endpoint: String,
    /// API key; required for remote endpoints
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            model: "llama3-8b-8192".to_string(),
            max_tokens: 2000,
            temperature: 0.2,
            timeout: Duration::from_secs(30),
        }
    }
}

impl From<&LlmSettings> for LlmConfig {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout: Duration::from_secs(settings.timeout_seconds),
        }
    }
}

/// Finish reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
}

/// Generation result
#[derive(Debug, Clone)]
pub struct Completion {
    /// Generated text
    pub text: String,
    /// Completion tokens reported by the API (0 if absent)
    pub tokens: usize,
    /// Wall-clock generation time (ms)
    pub total_time_ms: u64,
    /// Finish reason
    pub finish_reason: FinishReason,
}

/// LLM backend trait
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Generate a reply for the message sequence. Exactly one attempt.
    async fn generate(&self, messages: &[Message]) -> Result<Completion, LlmError>;

    /// Check whether the backend is reachable.
    async fn is_available(&self) -> bool;

    /// Model name
    fn model_name(&self) -> &str;
}

/// OpenAI-compatible backend
///
/// Works with OpenAI, Groq, vLLM, and local servers exposing the
/// `/chat/completions` protocol.
pub struct OpenAiBackend {
    config: LlmConfig,
    client: Client,
}

impl OpenAiBackend {
    /// Create a new backend.
    ///
    /// A missing API key for a remote endpoint is a configuration error,
    /// detected here so the orchestrator can refuse to process turns.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let local = config.endpoint.starts_with("http://localhost")
            || config.endpoint.starts_with("http://127.0.0.1");
        if config.api_key.is_empty() && !local {
            return Err(LlmError::Configuration(
                "API key required for remote LLM endpoints".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a backend from application settings.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LlmError> {
        Self::new(LlmConfig::from(settings))
    }

    fn chat_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        use reqwest::header::HeaderValue;

        let mut headers = reqwest::header::HeaderMap::new();

        if !self.config.api_key.is_empty() {
            let auth_value = format!("Bearer {}", self.config.api_key);
            if let Ok(val) = HeaderValue::from_str(&auth_value) {
                headers.insert(reqwest::header::AUTHORIZATION, val);
            }
        }

        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        headers
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn generate(&self, messages: &[Message]) -> Result<Completion, LlmError> {
        let start = std::time::Instant::now();

        let chat_messages: Vec<ChatMessage> = messages
            .iter()
            .map(|m| ChatMessage {
                role: match m.role {
                    Role::System => "system".to_string(),
                    Role::User => "user".to_string(),
                    Role::Assistant => "assistant".to_string(),
                },
                content: m.content.clone(),
            })
            .collect();

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: chat_messages,
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
        };

        let response = self
            .client
            .post(self.chat_url())
            .headers(self.build_headers())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

        let total_time_ms = start.elapsed().as_millis() as u64;
        let tokens = response.usage.map(|u| u.completion_tokens).unwrap_or(0);

        tracing::debug!(
            model = %self.config.model,
            tokens,
            total_time_ms,
            "LLM generation complete"
        );

        Ok(Completion {
            text: choice.message.content.clone(),
            tokens,
            total_time_ms,
            finish_reason: match choice.finish_reason.as_deref() {
                Some("length") => FinishReason::Length,
                _ => FinishReason::Stop,
            },
        })
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/models", self.config.endpoint.trim_end_matches('/'));
        self.client
            .get(&url)
            .headers(self.build_headers())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// OpenAI-compatible wire types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    completion_tokens: usize,
    #[allow(dead_code)]
    prompt_tokens: usize,
    #[allow(dead_code)]
    total_tokens: usize,
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn test_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 2000);
    }

    #[test]
    fn test_remote_endpoint_requires_api_key() {
        let config = LlmConfig::default();
        assert!(matches!(
            OpenAiBackend::new(config),
            Err(LlmError::Configuration(_))
        ));
    }

    #[test]
    fn test_local_endpoint_allows_empty_key() {
        let config = LlmConfig {
            endpoint: "http://localhost:11434/v1".to_string(),
            ..Default::default()
        };
        assert!(OpenAiBackend::new(config).is_ok());
    }

    #[test]
    fn test_chat_url() {
        let config = LlmConfig {
            api_key: "key".to_string(),
            endpoint: "https://api.groq.com/openai/v1/".to_string(),
            ..Default::default()
        };
        let backend = OpenAiBackend::new(config).unwrap();
        assert_eq!(
            backend.chat_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_generate_parses_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "Our Pix rate is 0%."},
                    "finish_reason": "stop"
                }],
                "usage": {"completion_tokens": 8, "prompt_tokens": 42, "total_tokens": 50}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(LlmConfig {
            endpoint: server.uri(),
            api_key: "test-key".to_string(),
            ..Default::default()
        })
        .unwrap();

        let completion = backend
            .generate(&[Message::user("What are your fees?")])
            .await
            .unwrap();

        assert_eq!(completion.text, "Our Pix rate is 0%.");
        assert_eq!(completion.tokens, 8);
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn test_generate_surfaces_api_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .expect(1)
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(LlmConfig {
            endpoint: server.uri(),
            api_key: "bad-key".to_string(),
            ..Default::default()
        })
        .unwrap();

        let result = backend.generate(&[Message::user("hello")]).await;
        assert!(matches!(result, Err(LlmError::Api(_))));
    }
}
