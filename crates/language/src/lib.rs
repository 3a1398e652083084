//! Language detection, intent classification, and localization
//!
//! The conversation-understanding half of the assistant:
//! - Pattern/stop-word language scoring with confidence (`LanguageDetector`)
//! - Regex-driven intent classification (`IntentClassifier`)
//! - Localized greetings and currency formatting (`locale`)
//!
//! Detection and classification never fail: zero-signal inputs resolve to
//! the configured default language and the `general_chat` intent.

pub mod detector;
pub mod intent;
pub mod locale;
pub mod profiles;

pub use detector::{LanguageDetectionResult, LanguageDetector};
pub use intent::{IntentClassifier, IntentKind};
pub use locale::format_currency;
pub use profiles::{builtin_profiles, LanguageProfile};
