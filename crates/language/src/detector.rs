//! Language detection
//!
//! Scores raw text against the per-language profiles and produces a primary
//! language with a heuristic confidence, optionally a close second candidate.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::profiles::{builtin_profiles, LanguageProfile};

/// Fixed empirical normalization constant for confidence scoring.
const CONFIDENCE_NORMALIZER: f32 = 0.5;

/// A second candidate is reported when its score is within this ratio of the top.
const ALTERNATIVE_RATIO: f32 = 0.7;

/// Result of a language detection call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageDetectionResult {
    /// Detected language code
    pub detected_language: String,
    /// Heuristic confidence in [0, 1]
    pub confidence: f32,
    /// Close second candidate, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_language: Option<String>,
    /// Confidence of the second candidate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_confidence: Option<f32>,
}

/// Pattern/stop-word language detector
pub struct LanguageDetector {
    profiles: Vec<LanguageProfile>,
    default_language: String,
}

impl LanguageDetector {
    /// Create a detector over an explicit profile table
    pub fn new(profiles: Vec<LanguageProfile>, default_language: impl Into<String>) -> Self {
        Self {
            profiles,
            default_language: default_language.into(),
        }
    }

    /// Create a detector over the built-in profiles
    pub fn with_builtin_profiles(default_language: impl Into<String>) -> Self {
        Self::new(builtin_profiles(), default_language)
    }

    /// Configured default language
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Detect the language of `text`.
    ///
    /// Pure function of the input and the profile table: score each language
    /// as `2 * pattern_matches + stop_word_hits`, normalized by whitespace
    /// token count. Zero-signal inputs resolve to the default language with
    /// confidence 0.0. Score ties break toward earlier profile declaration.
    pub fn detect(&self, text: &str) -> LanguageDetectionResult {
        let text_lower = text.to_lowercase();
        let tokens: Vec<&str> = text_lower.split_whitespace().collect();

        let mut scores: Vec<(usize, f32)> = self
            .profiles
            .iter()
            .enumerate()
            .map(|(index, profile)| (index, self.score_profile(profile, &text_lower, &tokens)))
            .collect();

        // Stable sort keeps declaration order for equal scores.
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (top_index, top_score) = match scores.first() {
            Some(&(index, score)) if score > 0.0 => (index, score),
            _ => {
                return LanguageDetectionResult {
                    detected_language: self.default_language.clone(),
                    confidence: 0.0,
                    alternative_language: None,
                    alternative_confidence: None,
                };
            },
        };

        let mut result = LanguageDetectionResult {
            detected_language: self.profiles[top_index].code.clone(),
            confidence: (top_score / CONFIDENCE_NORMALIZER).min(1.0),
            alternative_language: None,
            alternative_confidence: None,
        };

        if let Some(&(second_index, second_score)) = scores.get(1) {
            if second_score > 0.0 && second_score / top_score > ALTERNATIVE_RATIO {
                result.alternative_language = Some(self.profiles[second_index].code.clone());
                result.alternative_confidence =
                    Some((second_score / CONFIDENCE_NORMALIZER).min(1.0));
            }
        }

        tracing::debug!(
            language = %result.detected_language,
            confidence = result.confidence,
            "Language detection"
        );

        result
    }

    fn score_profile(&self, profile: &LanguageProfile, text_lower: &str, tokens: &[&str]) -> f32 {
        if tokens.is_empty() {
            return 0.0;
        }

        let pattern_matches: usize = profile
            .patterns
            .iter()
            .map(|pattern| pattern.find_iter(text_lower).count())
            .sum();

        let stop_word_hits = tokens
            .iter()
            .filter(|word| profile.stop_words.contains(**word))
            .count();

        (2 * pattern_matches + stop_word_hits) as f32 / tokens.len() as f32
    }

    /// Pick a canned greeting for `language` using the supplied random source.
    ///
    /// Unknown languages fall back to the default profile's greeting set.
    pub fn greeting<R: Rng + ?Sized>(&self, language: &str, rng: &mut R) -> String {
        let profile = self
            .profiles
            .iter()
            .find(|p| p.code == language)
            .or_else(|| self.profiles.iter().find(|p| p.code == self.default_language))
            .or_else(|| self.profiles.first());

        profile
            .and_then(|p| p.greetings.choose(rng))
            .cloned()
            .unwrap_or_else(|| "Hello! How can I help you today?".to_string())
    }
}
