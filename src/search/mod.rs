//! Semantic retrieval over the chunk index.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::SearchError;

use tracing::{debug, warn};

use crate::constants::validate_embedding_dim;
use crate::embedding::Embedder;
use crate::index::{ChunkMetadata, VectorIndex};
use crate::scoring::SimilarityCalibration;

/// One retrieved chunk, in retrieval order.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticHit {
    /// Position in the index and metadata sequence.
    pub chunk_index: usize,
    pub decision_id: i64,
    pub snippet: String,
    /// Inner product as returned by the index.
    pub raw_similarity: f32,
    /// `raw_similarity` squashed into the calibration band.
    pub semantic_score: f32,
}

/// Builds the enhanced query, embeds it, and resolves index hits to chunk metadata.
pub struct SemanticSearcher<E, I> {
    embedder: E,
    index: I,
    metadata: Vec<ChunkMetadata>,
    calibration: SimilarityCalibration,
}

impl<E: Embedder, I: VectorIndex> SemanticSearcher<E, I> {
    /// Fails when the embedder and index dimensions differ. A length mismatch between
    /// index and metadata is only logged: positions without metadata are skipped at
    /// query time.
    pub fn new(
        embedder: E,
        index: I,
        metadata: Vec<ChunkMetadata>,
        calibration: SimilarityCalibration,
    ) -> Result<Self, SearchError> {
        validate_embedding_dim(embedder.embedding_dim(), index.dim())?;

        if index.len() != metadata.len() {
            warn!(
                vectors = index.len(),
                metadata = metadata.len(),
                "Index and metadata lengths differ; unmatched positions will be skipped"
            );
        }

        Ok(Self {
            embedder,
            index,
            metadata,
            calibration,
        })
    }

    /// Returns up to `top_k` hits for `query` enriched with `search_terms`.
    pub fn search(
        &self,
        query: &str,
        search_terms: &[String],
        top_k: usize,
    ) -> Result<Vec<SemanticHit>, SearchError> {
        let enhanced = enhanced_query(query, search_terms);
        let embedding = self.embedder.embed(&enhanced)?;
        let raw_hits = self.index.search(&embedding, top_k)?;

        let mut hits = Vec::with_capacity(raw_hits.len());
        for hit in raw_hits {
            let Some(meta) = self.metadata.get(hit.position) else {
                warn!(
                    position = hit.position,
                    metadata = self.metadata.len(),
                    "Index position has no metadata, skipping"
                );
                continue;
            };

            hits.push(SemanticHit {
                chunk_index: hit.position,
                decision_id: meta.id,
                snippet: meta.snippet().to_string(),
                raw_similarity: hit.score,
                semantic_score: self.calibration.calibrate(hit.score),
            });
        }

        debug!(requested = top_k, returned = hits.len(), "Semantic search complete");
        Ok(hits)
    }

    pub fn metadata(&self) -> &[ChunkMetadata] {
        &self.metadata
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn calibration(&self) -> &SimilarityCalibration {
        &self.calibration
    }
}

/// The raw query followed by the space-joined search terms.
pub fn enhanced_query(query: &str, search_terms: &[String]) -> String {
    if search_terms.is_empty() {
        return query.to_string();
    }
    format!("{} {}", query, search_terms.join(" "))
}
