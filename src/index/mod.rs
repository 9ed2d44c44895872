//! Prebuilt chunk index: a flat inner-product matrix plus positionally aligned metadata.
//!
//! Row `n` of the index and entry `n` of the metadata sequence describe the same chunk.
//! Nothing in the file formats enforces that; callers must treat a position with no
//! metadata as a stale hit and skip it.

pub mod error;
pub mod flat;
pub mod metadata;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::IndexError;
pub use flat::{FlatIpIndex, INDEX_HEADER_LEN, INDEX_MAGIC, INDEX_VERSION};
pub use metadata::{ChunkMetadata, load_chunk_metadata, write_chunk_metadata};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockVectorIndex;

/// One nearest-neighbor hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexHit {
    /// Row in the index (also the metadata position).
    pub position: usize,
    /// Raw inner-product similarity.
    pub score: f32,
}

/// Read-only nearest-neighbor search over chunk embeddings.
pub trait VectorIndex: Send + Sync {
    /// Vector dimension stored in the index.
    fn dim(&self) -> usize;

    /// Number of indexed vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns up to `k` hits ordered by descending inner product.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<IndexHit>, IndexError>;
}
