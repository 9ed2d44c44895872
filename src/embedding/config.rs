use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default max tokens fed to the encoder.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Dimension of stub embeddings (matches MiniLM-class sentence models).
pub const DEFAULT_STUB_DIM: usize = 384;

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
pub struct EmbedderConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    /// `None` selects stub mode.
    pub model_dir: Option<PathBuf>,
    /// Max tokens to consider.
    pub max_seq_len: usize,
    /// L2-normalize model outputs. Off by default: the index stores raw pooled vectors.
    pub normalize: bool,
    /// Output dimension in stub mode.
    pub stub_dim: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            normalize: false,
            stub_dim: DEFAULT_STUB_DIM,
        }
    }
}

impl EmbedderConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; deterministic embeddings).
    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_stub_dim(mut self, dim: usize) -> Self {
        self.stub_dim = dim;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Validates the config (does not load anything).
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be positive".to_string(),
            });
        }

        match &self.model_dir {
            None if self.stub_dim == 0 => Err(EmbeddingError::InvalidConfig {
                reason: "stub_dim must be positive".to_string(),
            }),
            None => Ok(()),
            Some(dir) if !dir.is_dir() => Err(EmbeddingError::ModelNotFound { path: dir.clone() }),
            Some(dir) => {
                for file in ["config.json", "model.safetensors", "tokenizer.json"] {
                    if !dir.join(file).is_file() {
                        return Err(EmbeddingError::MissingModelFile {
                            dir: dir.clone(),
                            file,
                        });
                    }
                }
                Ok(())
            }
        }
    }
}
