use thiserror::Error;

use crate::constants::DimValidationError;
use crate::embedding::EmbeddingError;
use crate::index::IndexError;

#[derive(Debug, Error)]
/// Errors returned by semantic search.
pub enum SearchError {
    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("index search failed: {0}")]
    Index(#[from] IndexError),

    /// Embedder and index live in different vector spaces.
    #[error("embedder does not match index: {0}")]
    Dimension(#[from] DimValidationError),
}
