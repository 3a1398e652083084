//! Intent classification
//!
//! Keyword/regex matching over lower-cased input, not tokenized NLP. Each
//! intent owns a pattern set; an intent is included once if any pattern
//! matches. `general_chat` is the guaranteed fallback.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Types of user intents we can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Greeting,
    ProductInquiry,
    PricingQuestion,
    TechnicalSupport,
    CompanyInfo,
    FeatureExplanation,
    Comparison,
    HowToStart,
    ContactSales,
    GeneralChat,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Greeting => "greeting",
            IntentKind::ProductInquiry => "product_inquiry",
            IntentKind::PricingQuestion => "pricing_question",
            IntentKind::TechnicalSupport => "technical_support",
            IntentKind::CompanyInfo => "company_info",
            IntentKind::FeatureExplanation => "feature_explanation",
            IntentKind::Comparison => "comparison",
            IntentKind::HowToStart => "how_to_start",
            IntentKind::ContactSales => "contact_sales",
            IntentKind::GeneralChat => "general_chat",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Compiled once; declaration order is the classification order.
static INTENT_RULES: Lazy<Vec<(IntentKind, Vec<Regex>)>> = Lazy::new(|| {
    let table: &[(IntentKind, &[&str])] = &[
        (
            IntentKind::Greeting,
            &[r"\b(hi|hello|hey|ola|olá|oi|hola|bom dia|boa tarde|boa noite|good morning|good afternoon)\b"],
        ),
        (
            IntentKind::ProductInquiry,
            &[r"\b(infinitepay|infinitetap|jim|stratus|maquininha|product|produto|producto)\b"],
        ),
        (
            IntentKind::PricingQuestion,
            &[
                r"\b(price|prices|pricing|fee|fees|rate|rates|cost|costs)\b",
                r"\b(taxa|taxas|preço|preços|custo|custos|tarifa|tarifas)\b",
                r"\b(how much|quanto custa|cuánto cuesta)\b",
            ],
        ),
        (
            IntentKind::TechnicalSupport,
            &[
                r"\b(help|support|problem|error|issue|broken|not working)\b",
                r"\b(ajuda|suporte|problema|erro|não funciona|ayuda|soporte)\b",
            ],
        ),
        (
            IntentKind::CompanyInfo,
            &[
                r"\b(cloudwalk|company|mission|about you|who are you|founded)\b",
                r"\b(empresa|missão|quem são|sobre vocês|misión)\b",
            ],
        ),
        (
            IntentKind::FeatureExplanation,
            &[
                r"\b(feature|features|how does .+ work|what does .+ do)\b",
                r"\b(funciona|recurso|recursos|funcionalidade|funcionalidades)\b",
            ],
        ),
        (
            IntentKind::Comparison,
            &[
                r"\b(compare|comparison|versus|vs\.?|better than|difference between)\b",
                r"\b(comparar|comparação|melhor que|diferença|diferencia)\b",
            ],
        ),
        (
            IntentKind::HowToStart,
            &[
                r"\b(how (do|can) i (start|sign up|begin)|get started|open an account|sign up)\b",
                r"\b(como começar|como criar|cadastrar|abrir conta|empezar)\b",
            ],
        ),
        (
            IntentKind::ContactSales,
            &[
                r"\b(sales|talk to (someone|a person|sales)|contact|representative|quote)\b",
                r"\b(vendas|falar com|contato|representante|contacto)\b",
            ],
        ),
    ];

    table
        .iter()
        .map(|(intent, patterns)| {
            let compiled = patterns.iter().map(|p| Regex::new(p).unwrap()).collect();
            (*intent, compiled)
        })
        .collect()
});

/// Regex-driven intent classifier
pub struct IntentClassifier {
    /// (intent, patterns) pairs in fixed declaration order
    rules: &'static [(IntentKind, Vec<Regex>)],
}

impl IntentClassifier {
    /// Create the classifier over the built-in pattern table.
    pub fn new() -> Self {
        Self {
            rules: &INTENT_RULES,
        }
    }

    /// Detect intents in declaration order.
    ///
    /// The result is non-empty and free of duplicates; when no pattern
    /// matches it is exactly `[general_chat]`.
    pub fn detect_intents(&self, text: &str) -> Vec<IntentKind> {
        let input = text.to_lowercase();

        let mut detected: Vec<IntentKind> = self
            .rules
            .iter()
            .filter(|(_, patterns)| patterns.iter().any(|p| p.is_match(&input)))
            .map(|(intent, _)| *intent)
            .collect();

        if detected.is_empty() {
            detected.push(IntentKind::GeneralChat);
        }

        detected
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting() {
        let classifier = IntentClassifier::new();
        let intents = classifier.detect_intents("Hello!");
        assert_eq!(intents, vec![IntentKind::Greeting]);
    }

    #[test]
    fn test_pricing_question() {
        let classifier = IntentClassifier::new();
        let intents = classifier.detect_intents("Hello, what are your fees?");
        assert!(intents.contains(&IntentKind::Greeting));
        assert!(intents.contains(&IntentKind::PricingQuestion));
    }

    #[test]
    fn test_pricing_in_portuguese() {
        let classifier = IntentClassifier::new();
        let intents = classifier.detect_intents("Qual a taxa do Pix?");
        assert!(intents.contains(&IntentKind::PricingQuestion));
    }

    #[test]
    fn test_product_inquiry() {
        let classifier = IntentClassifier::new();
        let intents = classifier.detect_intents("Tell me about InfinitePay");
        assert!(intents.contains(&IntentKind::ProductInquiry));
    }

    #[test]
    fn test_fallback_is_general_chat() {
        let classifier = IntentClassifier::new();
        let intents = classifier.detect_intents("The weather is nice today");
        assert_eq!(intents, vec![IntentKind::GeneralChat]);
    }

    #[test]
    fn test_result_never_empty() {
        let classifier = IntentClassifier::new();
        for input in ["", "   ", "zzz", "Hello, how much is the maquininha?"] {
            assert!(!classifier.detect_intents(input).is_empty());
        }
    }

    #[test]
    fn test_no_duplicates() {
        let classifier = IntentClassifier::new();
        // Multiple pricing patterns match; the intent appears once.
        let intents = classifier.detect_intents("what is the price, cost and fee?");
        let pricing = intents
            .iter()
            .filter(|i| **i == IntentKind::PricingQuestion)
            .count();
        assert_eq!(pricing, 1);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let classifier = IntentClassifier::new();
        let intents = classifier.detect_intents("Hi, how much does InfinitePay cost?");
        let greeting_pos = intents.iter().position(|i| *i == IntentKind::Greeting);
        let pricing_pos = intents.iter().position(|i| *i == IntentKind::PricingQuestion);
        let product_pos = intents.iter().position(|i| *i == IntentKind::ProductInquiry);
        assert!(greeting_pos < product_pos);
        assert!(product_pos < pricing_pos);
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = IntentClassifier::new();
        let intents = classifier.detect_intents("WHAT ARE YOUR FEES?");
        assert!(intents.contains(&IntentKind::PricingQuestion));
    }
}
