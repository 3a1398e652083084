//! Qdrant-backed similarity engine
//!
//! Production adapter for the [`SimilarityEngine`] contract. Content is
//! stored under the `text` payload key; document metadata is stored as flat
//! string payload fields so equality filters map directly onto Qdrant
//! keyword conditions.

use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    value::Kind, Condition, CountPointsBuilder, CreateCollectionBuilder, Distance, FieldCondition,
    Filter, GetPointsBuilder, Match, PointId, PointStruct, RetrievedPoint, ScoredPoint,
    ScrollPointsBuilder, SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::Qdrant;

use crate::embeddings::{EmbeddingConfig, HashEmbedder};
use crate::engine::{EngineHit, EnginePoint, MetadataFilter, SimilarityEngine};
use crate::KnowledgeError;

/// Qdrant engine configuration
#[derive(Debug, Clone)]
pub struct QdrantEngineConfig {
    /// Qdrant endpoint
    pub endpoint: String,
    /// Collection name
    pub collection: String,
    /// Vector dimension
    pub vector_dim: usize,
    /// API key (optional)
    pub api_key: Option<String>,
}

impl Default for QdrantEngineConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:6334".to_string(),
            collection: "assistant_knowledge".to_string(),
            vector_dim: 384,
            api_key: None,
        }
    }
}

/// Qdrant similarity engine
pub struct QdrantEngine {
    client: Qdrant,
    config: QdrantEngineConfig,
    embedder: HashEmbedder,
}

impl QdrantEngine {
    /// Create a new engine connection.
    pub fn new(config: QdrantEngineConfig) -> Result<Self, KnowledgeError> {
        let mut builder = Qdrant::from_url(&config.endpoint);

        if let Some(ref api_key) = config.api_key {
            builder = builder.api_key(api_key.clone());
            tracing::info!("Qdrant connection using API key authentication");
        }

        let client = builder
            .build()
            .map_err(|e| KnowledgeError::Connection(e.to_string()))?;

        let embedder = HashEmbedder::new(EmbeddingConfig {
            dim: config.vector_dim,
            normalize: true,
        });

        Ok(Self {
            client,
            config,
            embedder,
        })
    }

    /// Create the collection if it does not exist yet.
    pub async fn ensure_collection(&self) -> Result<(), KnowledgeError> {
        let exists = self
            .client
            .collection_exists(&self.config.collection)
            .await
            .map_err(|e| KnowledgeError::Engine(e.to_string()))?;

        if !exists {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.config.collection).vectors_config(
                        VectorParamsBuilder::new(self.config.vector_dim as u64, Distance::Cosine),
                    ),
                )
                .await
                .map_err(|e| KnowledgeError::Engine(e.to_string()))?;
        }

        Ok(())
    }

    fn keyword_condition(key: &str, value: &str) -> Condition {
        Condition {
            condition_one_of: Some(qdrant_client::qdrant::condition::ConditionOneOf::Field(
                FieldCondition {
                    key: key.to_string(),
                    r#match: Some(Match {
                        match_value: Some(qdrant_client::qdrant::r#match::MatchValue::Keyword(
                            value.to_string(),
                        )),
                    }),
                    ..Default::default()
                },
            )),
        }
    }

    fn filter_to_qdrant(filter: &MetadataFilter) -> Option<Filter> {
        if filter.is_empty() {
            return None;
        }

        let mut conditions = Vec::new();
        if let Some(ref language) = filter.language {
            conditions.push(Self::keyword_condition("language", language));
        }
        if let Some(ref product) = filter.product {
            conditions.push(Self::keyword_condition("product", product));
        }
        if let Some(ref category) = filter.category {
            conditions.push(Self::keyword_condition("category", category));
        }

        Some(Filter {
            must: conditions,
            ..Default::default()
        })
    }

    fn point_id_to_string(id: Option<PointId>) -> String {
        id.map(|pid| match pid.point_id_options {
            Some(qdrant_client::qdrant::point_id::PointIdOptions::Uuid(u)) => u,
            Some(qdrant_client::qdrant::point_id::PointIdOptions::Num(n)) => n.to_string(),
            None => String::new(),
        })
        .unwrap_or_default()
    }

    fn split_payload(
        payload: HashMap<String, qdrant_client::qdrant::Value>,
    ) -> (String, HashMap<String, String>) {
        let mut content = String::new();
        let mut metadata = HashMap::new();

        for (k, v) in payload {
            if let Some(Kind::StringValue(s)) = v.kind {
                if k == "text" {
                    content = s;
                } else {
                    metadata.insert(k, s);
                }
            }
        }

        (content, metadata)
    }

    fn scored_point_to_hit(point: ScoredPoint) -> EngineHit {
        let (content, metadata) = Self::split_payload(point.payload);
        EngineHit {
            id: Self::point_id_to_string(point.id),
            content,
            metadata,
            // Qdrant reports cosine similarity (higher = closer); the engine
            // contract is ascending distance.
            distance: 1.0 - point.score,
        }
    }

    fn retrieved_point_to_hit(point: RetrievedPoint) -> EngineHit {
        let (content, metadata) = Self::split_payload(point.payload);
        EngineHit {
            id: Self::point_id_to_string(point.id),
            content,
            metadata,
            distance: 0.0,
        }
    }
}

#[async_trait]
impl SimilarityEngine for QdrantEngine {
    async fn upsert(&self, points: Vec<EnginePoint>) -> Result<(), KnowledgeError> {
        if points.is_empty() {
            return Ok(());
        }

        let qdrant_points: Vec<PointStruct> = points
            .into_iter()
            .map(|point| {
                let embedding = self.embedder.embed(&point.text);

                let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
                payload.insert("text".to_string(), point.text.into());
                for (k, v) in point.metadata {
                    payload.insert(k, v.into());
                }

                PointStruct::new(point.id, embedding, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(
                &self.config.collection,
                qdrant_points,
            ))
            .await
            .map_err(|e| KnowledgeError::Engine(e.to_string()))?;

        Ok(())
    }

    async fn query(
        &self,
        text: &str,
        limit: usize,
        filter: &MetadataFilter,
    ) -> Result<Vec<EngineHit>, KnowledgeError> {
        let query_embedding = self.embedder.embed(text);

        let mut search_builder = SearchPointsBuilder::new(
            &self.config.collection,
            query_embedding,
            limit as u64,
        )
        .with_payload(true);

        if let Some(qdrant_filter) = Self::filter_to_qdrant(filter) {
            search_builder = search_builder.filter(qdrant_filter);
        }

        let results = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| KnowledgeError::Search(e.to_string()))?;

        Ok(results
            .result
            .into_iter()
            .map(Self::scored_point_to_hit)
            .collect())
    }

    async fn fetch(&self, filter: &MetadataFilter) -> Result<Vec<EngineHit>, KnowledgeError> {
        let mut hits = Vec::new();
        let mut offset: Option<PointId> = None;

        // Page through the collection so category lookups are returned in full.
        loop {
            let mut builder = ScrollPointsBuilder::new(&self.config.collection)
                .limit(256)
                .with_payload(true);

            if let Some(qdrant_filter) = Self::filter_to_qdrant(filter) {
                builder = builder.filter(qdrant_filter);
            }
            if let Some(page_offset) = offset.take() {
                builder = builder.offset(page_offset);
            }

            let response = self
                .client
                .scroll(builder)
                .await
                .map_err(|e| KnowledgeError::Search(e.to_string()))?;

            hits.extend(response.result.into_iter().map(Self::retrieved_point_to_hit));

            match response.next_page_offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(hits)
    }

    async fn contains(&self, id: &str) -> Result<bool, KnowledgeError> {
        let response = self
            .client
            .get_points(
                GetPointsBuilder::new(
                    &self.config.collection,
                    vec![PointId::from(id.to_string())],
                )
                .with_payload(false),
            )
            .await
            .map_err(|e| KnowledgeError::Engine(e.to_string()))?;

        Ok(!response.result.is_empty())
    }

    async fn count(&self) -> Result<usize, KnowledgeError> {
        let response = self
            .client
            .count(CountPointsBuilder::new(&self.config.collection).exact(true))
            .await
            .map_err(|e| KnowledgeError::Engine(e.to_string()))?;

        Ok(response.result.map(|r| r.count as usize).unwrap_or(0))
    }
}
