//! Knowledge store with metadata-filtered similarity search
//!
//! Documents are tagged with language/category/product metadata and stored
//! behind the [`SimilarityEngine`] trait: the external collaborator that owns
//! literal similarity scoring. Two engines are provided:
//! - [`InMemoryEngine`]: deterministic hash-embedding engine for tests/dev
//! - [`QdrantEngine`]: production adapter over Qdrant
//!
//! The [`KnowledgeStore`] layers the document contracts on top: idempotent
//! upsert by content id, conjunctive metadata filters, category lookups, and
//! the heuristic product-info bucketer.

pub mod document;
pub mod embeddings;
pub mod engine;
pub mod qdrant;
pub mod seed;
pub mod store;

pub use document::{content_id, KnowledgeDocument};
pub use embeddings::{EmbeddingConfig, HashEmbedder};
pub use engine::{EngineHit, EnginePoint, InMemoryEngine, MetadataFilter, SimilarityEngine};
pub use qdrant::{QdrantEngine, QdrantEngineConfig};
pub use seed::core_documents;
pub use store::{KnowledgeStore, ProductInfo, SearchHit};

use thiserror::Error;

/// Knowledge errors
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<KnowledgeError> for assistant_core::Error {
    fn from(err: KnowledgeError) -> Self {
        assistant_core::Error::Knowledge(err.to_string())
    }
}
