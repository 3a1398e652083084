//! Prompt building
//!
//! Assembles the message sequence sent to the LLM: persona system prompt,
//! optional retrieval context block, the tail of the conversation history,
//! then the new user turn.

use assistant_config::BrandProfile;
use assistant_core::{Message, Turn, TurnRole};

/// Builder for the per-turn message sequence
pub struct PromptBuilder {
    messages: Vec<Message>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Persona/system instruction embedding the resolved language and the
    /// fixed brand product block.
    pub fn system_prompt(mut self, language: &str, brand: &BrandProfile) -> Self {
        let system = format!(
            r#"You are {name}'s AI assistant - friendly, knowledgeable, and passionate about helping merchants succeed!
Your personality is warm and professional. You are enthusiastic about our mission: {tagline}
Use only a few emojis appropriately to add warmth. Speak in {language}.

Key Products:
{products}"#,
            name = brand.name,
            tagline = brand.tagline,
            language = language,
            products = brand.product_lines(),
        );

        self.messages.push(Message::system(system));
        self
    }

    /// Add the retrieval context block. Empty context adds nothing, so a
    /// degraded retrieval step simply produces a shorter prompt.
    pub fn with_context(mut self, context: &str) -> Self {
        if !context.is_empty() {
            self.messages.push(Message::system(format!(
                "Use this information to answer the user's question:\n{}",
                context
            )));
        }
        self
    }

    /// Add the last `limit` history turns, oldest of that slice first.
    pub fn with_history(mut self, history: &[Turn], limit: usize) -> Self {
        let tail = &history[history.len().saturating_sub(limit)..];
        for turn in tail {
            let message = match turn.role {
                TurnRole::User => Message::user(&turn.content),
                TurnRole::Assistant => Message::assistant(&turn.content),
            };
            self.messages.push(message);
        }
        self
    }

    /// Add the new user input as the final turn.
    pub fn user_message(mut self, content: &str) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Build the final message list.
    pub fn build(self) -> Vec<Message> {
        self.messages
    }

    /// Number of messages accumulated so far.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use assistant_core::Role;

    use super::*;

    fn brand() -> BrandProfile {
        BrandProfile::default()
    }

    #[test]
    fn test_system_prompt_embeds_language_and_products() {
        let messages = PromptBuilder::new()
            .system_prompt("pt-BR", &brand())
            .build();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Speak in pt-BR"));
        assert!(messages[0].content.contains("InfinitePay"));
    }

    #[test]
    fn test_empty_context_is_skipped() {
        let messages = PromptBuilder::new()
            .system_prompt("en", &brand())
            .with_context("")
            .user_message("hello")
            .build();

        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_context_block_added_as_system_message() {
        let messages = PromptBuilder::new()
            .system_prompt("en", &brand())
            .with_context("Fees start at 0% for Pix.")
            .user_message("What are your fees?")
            .build();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::System);
        assert!(messages[1].content.contains("0% for Pix"));
    }

    #[test]
    fn test_history_is_truncated_to_last_n() {
        let history: Vec<Turn> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    Turn::user(format!("question {}", i))
                } else {
                    Turn::assistant(format!("answer {}", i))
                }
            })
            .collect();

        let messages = PromptBuilder::new()
            .system_prompt("en", &brand())
            .with_history(&history, 4)
            .user_message("new question")
            .build();

        // system + 4 history + 1 new user turn
        assert_eq!(messages.len(), 6);
        // Oldest of the slice first, chronological order preserved.
        assert_eq!(messages[1].content, "question 6");
        assert_eq!(messages[2].content, "answer 7");
        assert_eq!(messages[3].content, "question 8");
        assert_eq!(messages[4].content, "answer 9");
        assert_eq!(messages[5].content, "new question");
    }

    #[test]
    fn test_short_history_is_included_in_full() {
        let history = vec![Turn::user("hi"), Turn::assistant("hello!")];

        let messages = PromptBuilder::new()
            .system_prompt("en", &brand())
            .with_history(&history, 4)
            .user_message("next")
            .build();

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content, "hi");
        assert_eq!(messages[2].content, "hello!");
    }
}
