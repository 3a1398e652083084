//! Per-language detection profiles
//!
//! Each profile carries the regex patterns, stop words, and canned greetings
//! for one language. Profiles are immutable after construction; declaration
//! order is significant (score ties break toward earlier profiles).

use std::collections::HashSet;

use regex::Regex;

/// Detection profile for a single language
pub struct LanguageProfile {
    /// Language code (e.g. "pt-BR")
    pub code: String,
    /// Compiled detection patterns
    pub patterns: Vec<Regex>,
    /// Common function words for this language
    pub stop_words: HashSet<String>,
    /// Canned greeting responses
    pub greetings: Vec<String>,
}

impl LanguageProfile {
    fn new(code: &str, patterns: &[&str], stop_words: &[&str], greetings: &[&str]) -> Self {
        Self {
            code: code.to_string(),
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("bad pattern for {code}: {e}")))
                .collect(),
            stop_words: stop_words.iter().map(|w| w.to_string()).collect(),
            greetings: greetings.iter().map(|g| g.to_string()).collect(),
        }
    }
}

/// Built-in profiles for the supported languages, in declaration order.
pub fn builtin_profiles() -> Vec<LanguageProfile> {
    vec![
        LanguageProfile::new(
            "pt-BR",
            &[
                r"\b(olá|oi|bom dia|boa tarde|boa noite|obrigad[oa]|por favor|tchau|até|vocês?|está|estou|são|sou|meu|minha|nosso|nossa)\b",
                r"\b(maquininha|cartão|pagamento|taxa|pix|boleto|conta|dinheiro|receber|vender|comprar)\b",
                r"\b(fazer|querer|poder|precisar|ter|ser|estar)\b",
                r"\b(não|sim|talvez|claro|certo|errado)\b",
            ],
            &[
                "de", "da", "do", "a", "o", "um", "uma", "para", "com", "em", "no", "na",
            ],
            &[
                "Olá! Bem-vindo à CloudWalk! 🚀",
                "Oi! Como posso ajudar você hoje?",
                "Seja bem-vindo! Sou o assistente da CloudWalk.",
            ],
        ),
        LanguageProfile::new(
            "en",
            &[
                r"\b(hello|hi|good morning|good afternoon|good evening|thanks|thank you|please|bye|goodbye|you|your|are|am|is|my|our)\b",
                r"\b(card|payment|fee|rate|account|money|receive|sell|buy|terminal)\b",
                r"\b(do|want|can|need|have|be)\b",
                r"\b(no|yes|maybe|sure|right|wrong)\b",
            ],
            &["the", "a", "an", "to", "for", "with", "in", "on", "at"],
            &[
                "Hello! Welcome to CloudWalk! 🚀",
                "Hi there! How can I help you today?",
                "Welcome! I'm CloudWalk's AI assistant.",
            ],
        ),
        LanguageProfile::new(
            "es",
            &[
                r"\b(hola|buenos días|buenas tardes|buenas noches|gracias|por favor|adiós|usted|ustedes|está|estoy|son|soy|mi|nuestro|nuestra)\b",
                r"\b(tarjeta|pago|tarifa|cuenta|dinero|recibir|vender|comprar|terminal)\b",
                r"\b(hacer|querer|poder|necesitar|tener|ser|estar)\b",
                r"\b(no|sí|quizás|claro|cierto|equivocado)\b",
            ],
            &[
                "de", "la", "el", "un", "una", "para", "con", "en", "los", "las",
            ],
            &[
                "¡Hola! ¡Bienvenido a CloudWalk! 🚀",
                "¡Hola! ¿Cómo puedo ayudarte hoy?",
                "¡Bienvenido! Soy el asistente de CloudWalk.",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_order() {
        let profiles = builtin_profiles();
        let codes: Vec<&str> = profiles.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["pt-BR", "en", "es"]);
    }

    #[test]
    fn test_profiles_are_nonempty() {
        for profile in builtin_profiles() {
            assert!(!profile.patterns.is_empty(), "{} has no patterns", profile.code);
            assert!(!profile.stop_words.is_empty());
            assert!(!profile.greetings.is_empty());
        }
    }

    #[test]
    fn test_portuguese_patterns_match() {
        let profiles = builtin_profiles();
        let pt = &profiles[0];
        let text = "qual a taxa do pix?";
        let matches: usize = pt.patterns.iter().map(|p| p.find_iter(text).count()).sum();
        assert!(matches >= 2);
    }
}
