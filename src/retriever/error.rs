use thiserror::Error;

use crate::config::ConfigError;
use crate::constants::DimValidationError;
use crate::embedding::EmbeddingError;
use crate::index::IndexError;
use crate::llm::LlmError;
use crate::search::SearchError;
use crate::store::StoreError;

#[derive(Debug, Error)]
/// Unrecoverable retrieval failures.
///
/// Everything else (model outages, malformed answers, missing rows) degrades locally
/// and never reaches the caller.
pub enum RetrieverError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The query (or the embedder itself) could not be encoded.
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Index or metadata could not be opened or searched.
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("embedder does not match index: {0}")]
    Dimension(#[from] DimValidationError),

    #[error("decision store error: {0}")]
    Store(#[from] StoreError),

    #[error("language model error: {0}")]
    Llm(#[from] LlmError),
}

impl From<SearchError> for RetrieverError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Embedding(e) => RetrieverError::Embedding(e),
            SearchError::Index(e) => RetrieverError::Index(e),
            SearchError::Dimension(e) => RetrieverError::Dimension(e),
        }
    }
}
