//! Response orchestration
//!
//! One turn, start to finish: detect language (sticky below the confidence
//! threshold), classify intents, retrieve knowledge with context-derived
//! filters, assemble the prompt, call the LLM, record the exchange.
//! Retrieval failures degrade to an empty context block; generation failures
//! degrade to a fixed apology with the context left untouched.

use std::sync::Arc;

use rand::Rng;

use assistant_config::BrandProfile;
use assistant_knowledge::{KnowledgeStore, MetadataFilter};
use assistant_language::{IntentClassifier, LanguageDetector};
use assistant_llm::{ChatBackend, PromptBuilder};

use crate::context::ConversationContext;
use crate::AgentError;

/// Read-side history bound for prompting. Storage is never truncated.
pub const HISTORY_WINDOW: usize = 4;

/// Fixed reply for a failed generation.
pub const APOLOGY: &str = "I apologize, but I encountered an error. Please try again.";

/// Orchestrator knobs derived from settings
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Process default language
    pub default_language: String,
    /// Detector confidence required to switch the session language
    pub confidence_threshold: f32,
    /// Maximum knowledge documents per turn
    pub max_knowledge_results: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            confidence_threshold: 0.6,
            max_knowledge_results: 3,
        }
    }
}

/// Composes detector, classifier, knowledge store, and LLM into the per-turn
/// pipeline. Constructed once per process; sessions share it by reference.
pub struct ResponseOrchestrator {
    detector: Arc<LanguageDetector>,
    classifier: Arc<IntentClassifier>,
    knowledge: Arc<KnowledgeStore>,
    backend: Arc<dyn ChatBackend>,
    brand: BrandProfile,
    config: OrchestratorConfig,
}

impl ResponseOrchestrator {
    /// Build the turn pipeline over already-validated collaborators.
    ///
    /// Bad knobs are a configuration error here, before any turn runs; the
    /// credential check lives in the backend constructor.
    pub fn new(
        detector: Arc<LanguageDetector>,
        classifier: Arc<IntentClassifier>,
        knowledge: Arc<KnowledgeStore>,
        backend: Arc<dyn ChatBackend>,
        brand: BrandProfile,
        config: OrchestratorConfig,
    ) -> Result<Self, AgentError> {
        if !(0.0..=1.0).contains(&config.confidence_threshold) {
            return Err(AgentError::Configuration(format!(
                "confidence_threshold must be in [0, 1], got {}",
                config.confidence_threshold
            )));
        }
        if config.max_knowledge_results == 0 {
            return Err(AgentError::Configuration(
                "max_knowledge_results must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            detector,
            classifier,
            knowledge,
            backend,
            brand,
            config,
        })
    }

    /// Generate a reply for one user turn.
    ///
    /// On success the context gains exactly one user/assistant pair; on
    /// generation failure it is returned unchanged alongside the apology.
    pub async fn generate_response(
        &self,
        user_input: &str,
        context: &mut ConversationContext,
    ) -> String {
        // Language is sticky: only a confident detection overrides it.
        let detection = self.detector.detect(user_input);
        if detection.confidence > self.config.confidence_threshold {
            context.language = detection.detected_language.clone();
        }

        let intents = self.classifier.detect_intents(user_input);
        tracing::debug!(
            session = %context.session_id,
            language = %context.language,
            ?intents,
            "Turn understood"
        );
        context.record_intents(&intents);

        let knowledge_block = self.retrieve_context(user_input, context).await;

        let messages = PromptBuilder::new()
            .system_prompt(&context.language, &self.brand)
            .with_context(&knowledge_block)
            .with_history(&context.conversation_history, HISTORY_WINDOW)
            .user_message(user_input)
            .build();

        match self.backend.generate(&messages).await {
            Ok(completion) => {
                let reply = completion.text.trim().to_string();
                context.record_exchange(user_input, &reply);
                reply
            },
            Err(e) => {
                tracing::error!(session = %context.session_id, error = %e, "LLM generation failed");
                APOLOGY.to_string()
            },
        }
    }

    /// Retrieve and concatenate knowledge for the turn.
    ///
    /// The language filter is only applied once the session has moved off
    /// the default language; the product filter follows the active product.
    /// Failures and empty results both yield an empty block.
    async fn retrieve_context(&self, user_input: &str, context: &ConversationContext) -> String {
        let mut filter = MetadataFilter::new();
        if context.language != self.config.default_language {
            filter = filter.language(context.language.clone());
        }
        if let Some(ref product) = context.current_product {
            filter = filter.product(product.clone());
        }

        match self
            .knowledge
            .search(user_input, self.config.max_knowledge_results, filter)
            .await
        {
            Ok(hits) => hits
                .iter()
                .map(|hit| hit.content.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => {
                tracing::warn!(
                    session = %context.session_id,
                    error = %e,
                    "Knowledge search failed, continuing without context"
                );
                String::new()
            },
        }
    }

    /// Localized canned greeting for a new session.
    pub fn greeting<R: Rng + ?Sized>(&self, context: &ConversationContext, rng: &mut R) -> String {
        self.detector.greeting(&context.language, rng)
    }

    /// Configured default language.
    pub fn default_language(&self) -> &str {
        &self.config.default_language
    }
}
