//! Similarity engine contract and the in-memory implementation
//!
//! The engine is the external collaborator that owns literal similarity
//! scoring. The store depends only on this trait, not on any particular
//! indexing algorithm.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::embeddings::{cosine_distance, HashEmbedder};
use crate::KnowledgeError;

/// Unit of storage handed to the engine
#[derive(Debug, Clone)]
pub struct EnginePoint {
    /// Document id
    pub id: String,
    /// Content text to index
    pub text: String,
    /// Flat string metadata stored next to the content
    pub metadata: HashMap<String, String>,
}

/// Ranked hit returned by the engine
#[derive(Debug, Clone)]
pub struct EngineHit {
    /// Document id
    pub id: String,
    /// Content text
    pub content: String,
    /// Metadata
    pub metadata: HashMap<String, String>,
    /// Distance from the query (ascending = more relevant)
    pub distance: f32,
}

/// Conjunctive equality filter over metadata fields.
///
/// Absent fields place no constraint.
#[derive(Debug, Clone, Default)]
pub struct MetadataFilter {
    pub language: Option<String>,
    pub product: Option<String>,
    pub category: Option<String>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when no field is constrained
    pub fn is_empty(&self) -> bool {
        self.language.is_none() && self.product.is_none() && self.category.is_none()
    }

    /// Check a metadata map against every constrained field (AND semantics).
    pub fn matches(&self, metadata: &HashMap<String, String>) -> bool {
        let field_matches = |key: &str, expected: &Option<String>| match expected {
            Some(value) => metadata.get(key).map(String::as_str) == Some(value.as_str()),
            None => true,
        };

        field_matches("language", &self.language)
            && field_matches("product", &self.product)
            && field_matches("category", &self.category)
    }
}

/// External document-similarity collaborator contract
#[async_trait]
pub trait SimilarityEngine: Send + Sync {
    /// Insert or replace points by id.
    async fn upsert(&self, points: Vec<EnginePoint>) -> Result<(), KnowledgeError>;

    /// Ranked similarity search, ascending distance, at most `limit` hits.
    async fn query(
        &self,
        text: &str,
        limit: usize,
        filter: &MetadataFilter,
    ) -> Result<Vec<EngineHit>, KnowledgeError>;

    /// Full filtered scan (no ranking guarantee, no loss).
    async fn fetch(&self, filter: &MetadataFilter) -> Result<Vec<EngineHit>, KnowledgeError>;

    /// Whether a point with this id exists.
    async fn contains(&self, id: &str) -> Result<bool, KnowledgeError>;

    /// Number of stored points.
    async fn count(&self) -> Result<usize, KnowledgeError>;
}

struct StoredPoint {
    text: String,
    metadata: HashMap<String, String>,
    embedding: Vec<f32>,
}

/// In-memory similarity engine.
///
/// Deterministic hash embeddings with cosine distance and full-scan
/// filtering. Tolerates concurrent reads; writes take the index lock.
pub struct InMemoryEngine {
    embedder: HashEmbedder,
    points: RwLock<HashMap<String, StoredPoint>>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self {
            embedder: HashEmbedder::default(),
            points: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SimilarityEngine for InMemoryEngine {
    async fn upsert(&self, points: Vec<EnginePoint>) -> Result<(), KnowledgeError> {
        let mut index = self.points.write();
        for point in points {
            let embedding = self.embedder.embed(&point.text);
            index.insert(
                point.id,
                StoredPoint {
                    text: point.text,
                    metadata: point.metadata,
                    embedding,
                },
            );
        }
        Ok(())
    }

    async fn query(
        &self,
        text: &str,
        limit: usize,
        filter: &MetadataFilter,
    ) -> Result<Vec<EngineHit>, KnowledgeError> {
        let query_embedding = self.embedder.embed(text);

        let index = self.points.read();
        let mut hits: Vec<EngineHit> = index
            .iter()
            .filter(|(_, point)| filter.matches(&point.metadata))
            .map(|(id, point)| EngineHit {
                id: id.clone(),
                content: point.text.clone(),
                metadata: point.metadata.clone(),
                distance: cosine_distance(&query_embedding, &point.embedding),
            })
            .collect();

        // Ascending distance; ties break by id so ordering stays deterministic.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(limit);

        Ok(hits)
    }

    async fn fetch(&self, filter: &MetadataFilter) -> Result<Vec<EngineHit>, KnowledgeError> {
        let index = self.points.read();
        let mut hits: Vec<EngineHit> = index
            .iter()
            .filter(|(_, point)| filter.matches(&point.metadata))
            .map(|(id, point)| EngineHit {
                id: id.clone(),
                content: point.text.clone(),
                metadata: point.metadata.clone(),
                distance: 0.0,
            })
            .collect();

        hits.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(hits)
    }

    async fn contains(&self, id: &str) -> Result<bool, KnowledgeError> {
        Ok(self.points.read().contains_key(id))
    }

    async fn count(&self) -> Result<usize, KnowledgeError> {
        Ok(self.points.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, text: &str, language: &str, category: &str) -> EnginePoint {
        let mut metadata = HashMap::new();
        metadata.insert("language".to_string(), language.to_string());
        metadata.insert("category".to_string(), category.to_string());
        EnginePoint {
            id: id.to_string(),
            text: text.to_string(),
            metadata,
        }
    }

    #[test]
    fn test_filter_matches_conjunctively() {
        let mut metadata = HashMap::new();
        metadata.insert("language".to_string(), "en".to_string());
        metadata.insert("category".to_string(), "products".to_string());

        assert!(MetadataFilter::new().matches(&metadata));
        assert!(MetadataFilter::new().language("en").matches(&metadata));
        assert!(MetadataFilter::new()
            .language("en")
            .category("products")
            .matches(&metadata));
        assert!(!MetadataFilter::new()
            .language("pt-BR")
            .category("products")
            .matches(&metadata));
        assert!(!MetadataFilter::new().product("jim").matches(&metadata));
    }

    #[tokio::test]
    async fn test_upsert_and_count() {
        let engine = InMemoryEngine::new();
        engine
            .upsert(vec![
                point("1", "first document", "en", "products"),
                point("2", "second document", "en", "company"),
            ])
            .await
            .unwrap();

        assert_eq!(engine.count().await.unwrap(), 2);
        assert!(engine.contains("1").await.unwrap());
        assert!(!engine.contains("3").await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_same_id_replaces() {
        let engine = InMemoryEngine::new();
        engine
            .upsert(vec![point("1", "original", "en", "products")])
            .await
            .unwrap();
        engine
            .upsert(vec![point("1", "replaced", "en", "products")])
            .await
            .unwrap();

        assert_eq!(engine.count().await.unwrap(), 1);
        let hits = engine
            .query("replaced", 1, &MetadataFilter::new())
            .await
            .unwrap();
        assert_eq!(hits[0].content, "replaced");
    }

    #[tokio::test]
    async fn test_query_respects_filter_and_limit() {
        let engine = InMemoryEngine::new();
        engine
            .upsert(vec![
                point("1", "fees for pix payments", "en", "products"),
                point("2", "taxas do pix", "pt-BR", "products"),
                point("3", "company mission statement", "en", "company"),
            ])
            .await
            .unwrap();

        let hits = engine
            .query("pix fees", 10, &MetadataFilter::new().language("en"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.metadata.get("language").unwrap() == "en"));

        let limited = engine
            .query("pix fees", 1, &MetadataFilter::new())
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_query_orders_by_ascending_distance() {
        let engine = InMemoryEngine::new();
        engine
            .upsert(vec![
                point("1", "infinitepay fees and rates", "en", "products"),
                point("2", "wholly unrelated text about weather", "en", "products"),
            ])
            .await
            .unwrap();

        let hits = engine
            .query("infinitepay fees", 2, &MetadataFilter::new())
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance <= hits[1].distance);
        assert_eq!(hits[0].id, "1");
    }

    #[tokio::test]
    async fn test_fetch_returns_all_matches() {
        let engine = InMemoryEngine::new();
        engine
            .upsert(vec![
                point("1", "a", "en", "products"),
                point("2", "b", "en", "products"),
                point("3", "c", "pt-BR", "products"),
            ])
            .await
            .unwrap();

        let hits = engine
            .fetch(&MetadataFilter::new().category("products"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 3);

        let en_only = engine
            .fetch(&MetadataFilter::new().category("products").language("en"))
            .await
            .unwrap();
        assert_eq!(en_only.len(), 2);
    }
}
