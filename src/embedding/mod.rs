//! Query embedding.
//!
//! - [`SentenceEmbedder`] encodes text with a BERT-family sentence model (mean pooling).
//! - [`EmbedderConfig::stub`] gives deterministic vectors without model files.
//!
//! The same model must have produced the chunk index; see
//! [`validate_embedding_dim`](crate::constants::validate_embedding_dim).

/// BERT encoder wrapper with mean pooling.
pub mod bert;
/// Embedder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Tokenizer loading helpers.
pub mod utils;


pub use config::{DEFAULT_MAX_SEQ_LEN, DEFAULT_STUB_DIM, EmbedderConfig};
pub use error::EmbeddingError;

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use bert::SentenceBert;
use device::select_device;
use utils::load_tokenizer_with_truncation;

/// Text → fixed-dimension vector in the index's embedding space.
pub trait Embedder: Send + Sync {
    /// Encodes a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Output dimension.
    fn embedding_dim(&self) -> usize;
}

enum EmbedderBackend {
    Model {
        model: SentenceBert,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Sentence embedder backed by candle (supports stub mode).
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
    dim: usize,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder (stub mode when no model directory is configured).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_dir) = config.model_dir.clone() else {
            warn!(
                dim = config.stub_dim,
                "No embedding model configured, running embedder in STUB mode"
            );
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                dim: config.stub_dim,
                config,
            });
        };

        let device = select_device()?;
        debug!(?device, "Selected compute device for embedder");

        let model = SentenceBert::load(&model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("failed to load BERT model: {}", e),
            }
        })?;

        let tokenizer =
            load_tokenizer_with_truncation(&model_dir, config.max_seq_len).map_err(|e| {
                EmbeddingError::TokenizationFailed {
                    reason: format!("failed to load tokenizer: {}", e),
                }
            })?;

        let dim = model.hidden_size();

        info!(
            model_dir = %model_dir.display(),
            embedding_dim = dim,
            max_seq_len = config.max_seq_len,
            normalize = config.normalize,
            "Embedding model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
            dim,
        })
    }

    /// Stub embedder with the default dimension.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(EmbedderConfig::stub())
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &SentenceBert,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        if encoding.get_ids().is_empty() {
            return Ok(vec![0.0; self.dim]);
        }

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Encoding query"
        );

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let pooled = model.mean_pooled(&input_ids, &type_ids, &attention_mask)?;
        let embedding = pooled.squeeze(0)?.to_vec1::<f32>()?;

        Ok(self.finish(embedding))
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let seed = crate::hashing::hash_to_u64(text.as_bytes());

        let mut state = seed;
        let embedding = (0..self.dim)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect();

        normalize(embedding)
    }

    fn finish(&self, embedding: Vec<f32>) -> Vec<f32> {
        if self.config.normalize {
            normalize(embedding)
        } else {
            embedding
        }
    }
}

impl Embedder for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }
}

/// L2-normalizes a vector in place (zero vectors are returned unchanged).
pub fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }
    embedding
}
