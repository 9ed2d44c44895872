use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("sentence model directory not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("sentence model directory {dir} is missing {file}")]
    MissingModelFile { dir: PathBuf, file: &'static str },

    #[error("failed to load sentence model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("query encoding failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
