//! Text embeddings
//!
//! The similarity engines need a dense vector per text. Real deployments can
//! point Qdrant at an externally embedded collection; both built-in engines
//! use the deterministic char-hash embedder below, which needs no model.

/// Embedding configuration
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Embedding dimension
    pub dim: usize,
    /// Normalize to unit length
    pub normalize: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dim: 384,
            normalize: true,
        }
    }
}

/// Hash-based embedder (no model required, deterministic)
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    config: EmbeddingConfig,
}

impl HashEmbedder {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self { config }
    }

    /// Generate an embedding from character positions.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.config.dim];

        for (i, c) in text.to_lowercase().chars().enumerate() {
            let idx = (c as usize + i) % self.config.dim;
            embedding[idx] += 1.0;
        }

        if self.config.normalize {
            let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                for v in &mut embedding {
                    *v /= norm;
                }
            }
        }

        embedding
    }

    /// Embedding dimension
    pub fn dim(&self) -> usize {
        self.config.dim
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(EmbeddingConfig::default())
    }
}

/// Cosine distance between two unit-normalized vectors (0 = identical).
pub(crate) fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    1.0 - dot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_is_normalized() {
        let embedder = HashEmbedder::default();
        let embedding = embedder.embed("Hello world");

        assert_eq!(embedding.len(), 384);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_embedding_is_deterministic() {
        let embedder = HashEmbedder::default();
        assert_eq!(embedder.embed("same text"), embedder.embed("same text"));
    }

    #[test]
    fn test_identical_text_has_zero_distance() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("InfinitePay fees");
        let b = embedder.embed("InfinitePay fees");
        assert!(cosine_distance(&a, &b).abs() < 1e-5);
    }

    #[test]
    fn test_similar_text_is_closer_than_dissimilar() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed("infinitepay fees and rates");
        let near = embedder.embed("infinitepay fees");
        let far = embedder.embed("zzqx");
        assert!(
            cosine_distance(&query, &near) < cosine_distance(&query, &far),
            "related text should score closer"
        );
    }
}
