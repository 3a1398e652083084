//! Knowledge store
//!
//! Layered over the similarity engine: idempotent upsert by content id,
//! conjunctive metadata-filtered search, category lookups, and the heuristic
//! product-info bucketer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::document::{content_id, KnowledgeDocument};
use crate::engine::{EngineHit, EnginePoint, MetadataFilter, SimilarityEngine};
use crate::KnowledgeError;

/// Ranked search hit
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Document id
    pub id: String,
    /// Content text
    pub content: String,
    /// Flat metadata (title, category, subcategory, tags, language, product)
    pub metadata: HashMap<String, String>,
    /// Distance reported by the engine (ascending = more relevant)
    pub distance: f32,
}

impl From<EngineHit> for SearchHit {
    fn from(hit: EngineHit) -> Self {
        Self {
            id: hit.id,
            content: hit.content,
            metadata: hit.metadata,
            distance: hit.distance,
        }
    }
}

/// Bucketed product information.
///
/// Filled heuristically from subcategory/title substrings; a later hit for a
/// bucket overwrites an earlier one, and anything unmatched lands in `other`.
#[derive(Debug, Clone, Default)]
pub struct ProductInfo {
    pub overview: String,
    pub features: String,
    pub pricing: String,
    pub other: Vec<String>,
}

/// Knowledge store over an external similarity engine
pub struct KnowledgeStore {
    engine: Arc<dyn SimilarityEngine>,
    /// Serializes upserts so concurrent inserts of the same logical document
    /// keep the idempotent-by-id invariant.
    write_lock: Mutex<()>,
}

impl KnowledgeStore {
    pub fn new(engine: Arc<dyn SimilarityEngine>) -> Self {
        Self {
            engine,
            write_lock: Mutex::new(()),
        }
    }

    /// Insert documents, skipping ids that already exist.
    ///
    /// Returns the number of documents actually inserted.
    pub async fn upsert(&self, documents: Vec<KnowledgeDocument>) -> Result<usize, KnowledgeError> {
        let _guard = self.write_lock.lock().await;

        let mut fresh = Vec::new();
        for doc in documents {
            if self.engine.contains(&doc.id).await? {
                tracing::debug!(id = %doc.id, title = %doc.title, "Skipping existing document");
                continue;
            }
            fresh.push(EnginePoint {
                id: doc.id.clone(),
                text: doc.content.clone(),
                metadata: doc.payload(),
            });
        }

        if fresh.is_empty() {
            return Ok(0);
        }

        let inserted = fresh.len();
        self.engine.upsert(fresh).await?;
        tracing::info!(count = inserted, "Added documents to knowledge store");

        Ok(inserted)
    }

    /// Metadata-filtered similarity search.
    ///
    /// Results come back in ascending distance order, at most `max_results`.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
        filter: MetadataFilter,
    ) -> Result<Vec<SearchHit>, KnowledgeError> {
        let hits = self.engine.query(query, max_results, &filter).await?;
        Ok(hits.into_iter().map(SearchHit::from).collect())
    }

    /// All documents in a category, optionally restricted to one language.
    pub async fn get_by_category(
        &self,
        category: &str,
        language: Option<&str>,
    ) -> Result<Vec<SearchHit>, KnowledgeError> {
        let mut filter = MetadataFilter::new().category(category);
        if let Some(language) = language {
            filter = filter.language(language);
        }

        let hits = self.engine.fetch(&filter).await?;
        Ok(hits.into_iter().map(SearchHit::from).collect())
    }

    /// Bucketed information about a product.
    ///
    /// Heuristic: each hit is routed by the first bucket whose substring
    /// appears in its subcategory or title; within a bucket the last match
    /// wins. This mirrors the long-standing behavior and is intentionally
    /// not a "best match" selection.
    pub async fn get_product_info(
        &self,
        product: &str,
        language: &str,
    ) -> Result<ProductInfo, KnowledgeError> {
        let hits = self
            .search(
                product,
                10,
                MetadataFilter::new()
                    .product(product.to_lowercase())
                    .language(language),
            )
            .await?;

        let mut info = ProductInfo::default();

        for hit in hits {
            let subcategory = hit
                .metadata
                .get("subcategory")
                .map(String::as_str)
                .unwrap_or("")
                .to_lowercase();
            let title = hit
                .metadata
                .get("title")
                .map(String::as_str)
                .unwrap_or("")
                .to_lowercase();

            if subcategory.contains("overview") || title.contains("overview") {
                info.overview = hit.content;
            } else if subcategory.contains("feature") || title.contains("feature") {
                info.features = hit.content;
            } else if subcategory.contains("fee")
                || subcategory.contains("pricing")
                || subcategory.contains("taxa")
                || title.contains("fee")
                || title.contains("pricing")
                || title.contains("taxa")
            {
                info.pricing = hit.content;
            } else {
                info.other.push(hit.content);
            }
        }

        Ok(info)
    }

    /// Add a custom document; the id derives from title and content.
    ///
    /// Returns the document id (existing documents are not duplicated).
    #[allow(clippy::too_many_arguments)]
    pub async fn add_custom_knowledge(
        &self,
        title: &str,
        content: &str,
        category: &str,
        tags: &[&str],
        language: &str,
        product: Option<&str>,
        subcategory: Option<&str>,
    ) -> Result<String, KnowledgeError> {
        let id = content_id(&format!("{}_{}", title, content));

        let mut document = KnowledgeDocument::new(title, content, category, language)
            .with_tags(tags);
        document.id = id.clone();
        if let Some(product) = product {
            document = document.with_product(product);
        }
        if let Some(subcategory) = subcategory {
            document = document.with_subcategory(subcategory);
        }

        self.upsert(vec![document]).await?;
        tracing::info!(%id, title, "Added custom knowledge");

        Ok(id)
    }

    /// Number of stored documents.
    pub async fn count(&self) -> Result<usize, KnowledgeError> {
        self.engine.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InMemoryEngine;

    fn store() -> KnowledgeStore {
        KnowledgeStore::new(Arc::new(InMemoryEngine::new()))
    }

    fn doc(title: &str, content: &str, category: &str, language: &str) -> KnowledgeDocument {
        KnowledgeDocument::new(title, content, category, language)
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let store = store();
        let document = doc("InfinitePay Fees", "Fees start at 0% for Pix.", "products", "en");
        let id = document.id.clone();

        let first = store.upsert(vec![document.clone()]).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(store.count().await.unwrap(), 1);

        // Same content, same id: second load is a no-op.
        let second = store.upsert(vec![document]).await.unwrap();
        assert_eq!(second, 0);
        assert_eq!(store.count().await.unwrap(), 1);

        // Recreating the document from the same content yields the same id.
        let again = doc("InfinitePay Fees", "Fees start at 0% for Pix.", "products", "en");
        assert_eq!(again.id, id);
    }

    #[tokio::test]
    async fn test_search_applies_filters() {
        let store = store();
        store
            .upsert(vec![
                doc("Fees", "InfinitePay fees are the lowest.", "products", "en")
                    .with_product("infinitepay"),
                doc("Taxas", "As taxas da InfinitePay são as menores.", "products", "pt-BR")
                    .with_product("infinitepay"),
                doc("JIM", "JIM charges 1.99% per transaction.", "products", "en")
                    .with_product("jim"),
            ])
            .await
            .unwrap();

        let hits = store
            .search("fees", 10, MetadataFilter::new().language("en").product("jim"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].content.contains("JIM"));
    }

    #[tokio::test]
    async fn test_search_respects_max_results() {
        let store = store();
        store
            .upsert(vec![
                doc("A", "first fees document", "products", "en"),
                doc("B", "second fees document", "products", "en"),
                doc("C", "third fees document", "products", "en"),
            ])
            .await
            .unwrap();

        let hits = store.search("fees", 2, MetadataFilter::new()).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_get_by_category() {
        let store = store();
        store
            .upsert(vec![
                doc("Mission", "Create the best payment network.", "company", "en"),
                doc("Fees", "Fees start at 0%.", "products", "en"),
                doc("Missão", "Criar a melhor rede de pagamentos.", "company", "pt-BR"),
            ])
            .await
            .unwrap();

        let all_company = store.get_by_category("company", None).await.unwrap();
        assert_eq!(all_company.len(), 2);

        let en_company = store.get_by_category("company", Some("en")).await.unwrap();
        assert_eq!(en_company.len(), 1);
        assert!(en_company[0].content.contains("payment network"));
    }

    #[tokio::test]
    async fn test_get_product_info_buckets() {
        let store = store();
        store
            .upsert(vec![
                doc(
                    "InfinitePay Overview",
                    "InfinitePay is a powerful financial platform.",
                    "products",
                    "en",
                )
                .with_subcategory("infinitepay")
                .with_product("infinitepay"),
                doc(
                    "InfinitePay Fees",
                    "Fees: 0% Pix, 0.75% debit, 2.69% credit.",
                    "products",
                    "en",
                )
                .with_subcategory("fees")
                .with_product("infinitepay"),
                doc(
                    "Maquininha Smart",
                    "The Maquininha Smart costs 12x R$ 16.58.",
                    "products",
                    "en",
                )
                .with_subcategory("hardware")
                .with_product("infinitepay"),
            ])
            .await
            .unwrap();

        let info = store.get_product_info("infinitepay", "en").await.unwrap();
        assert!(info.overview.contains("financial platform"));
        assert!(info.pricing.contains("0% Pix"));
        assert_ne!(info.overview, info.pricing);
        assert_eq!(info.other.len(), 1);
        assert!(info.other[0].contains("Maquininha"));
    }

    #[tokio::test]
    async fn test_add_custom_knowledge() {
        let store = store();
        let id = store
            .add_custom_knowledge(
                "Pix Limits",
                "Pix transfers are unlimited for merchants.",
                "products",
                &["pix", "limits"],
                "en",
                Some("infinitepay"),
                None,
            )
            .await
            .unwrap();

        assert_eq!(id, content_id("Pix Limits_Pix transfers are unlimited for merchants."));
        assert_eq!(store.count().await.unwrap(), 1);

        // Adding the same title/content again does not duplicate.
        let same = store
            .add_custom_knowledge(
                "Pix Limits",
                "Pix transfers are unlimited for merchants.",
                "products",
                &[],
                "en",
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(same, id);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
