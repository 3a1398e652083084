//! Knowledge document type

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derive a stable document id from content.
///
/// Pure function of the input: the same content always yields the same id,
/// which is what makes store loads idempotent.
pub fn content_id(content: &str) -> String {
    let digest = md5::compute(content.as_bytes());
    format!("{:x}", digest)[..16].to_string()
}

/// A stored text unit with category/product/language metadata.
///
/// Immutable after insertion except for controlled re-upsert by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Stable hash of content
    pub id: String,
    /// Document title
    pub title: String,
    /// Content text (the part that gets embedded)
    pub content: String,
    /// Category (e.g. "products", "company", "support")
    pub category: String,
    /// Optional subcategory, inspected by the product-info bucketer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Language code
    pub language: String,
    /// Optional product code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Last update timestamp
    pub last_updated: DateTime<Utc>,
    /// Free-form metadata
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl KnowledgeDocument {
    /// Create a document with an id derived from its content.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            id: content_id(&content),
            title: title.into(),
            content,
            category: category.into(),
            subcategory: None,
            tags: Vec::new(),
            language: language.into(),
            product: None,
            last_updated: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Flatten the document metadata into the string payload the similarity
    /// engine stores next to the content.
    pub fn payload(&self) -> HashMap<String, String> {
        let mut payload = HashMap::new();
        payload.insert("title".to_string(), self.title.clone());
        payload.insert("category".to_string(), self.category.clone());
        payload.insert(
            "subcategory".to_string(),
            self.subcategory.clone().unwrap_or_default(),
        );
        payload.insert("tags".to_string(), self.tags.join(","));
        payload.insert("language".to_string(), self.language.clone());
        payload.insert(
            "product".to_string(),
            self.product.clone().unwrap_or_default(),
        );
        payload.insert("last_updated".to_string(), self.last_updated.to_rfc3339());

        for (k, v) in &self.metadata {
            payload.insert(k.clone(), v.clone());
        }

        payload
    }
}
