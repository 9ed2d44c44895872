//! Cross-cutting, shared constants.
//!
//! Scoring defaults live here so that [`ScoringConfig`](crate::scoring::ScoringConfig),
//! the CLI and the tests agree on a single set of numbers.
//!
//! # Dimension Invariants
//!
//! The query embedder and the prebuilt chunk index must share one vector space. The
//! dimension is only known at runtime (it comes from the model config and the index
//! header), so [`validate_embedding_dim`] is called once when a retriever is opened.

/// Number of candidates in the "browse" set.
pub const DEFAULT_TOP_N: usize = 20;

/// Largest accepted browse-set size.
pub const MAX_TOP_N: usize = 1000;

/// Number of candidates in the "highlight" set handed to the explanation step.
pub const HIGHLIGHT_COUNT: usize = 3;

/// Retrieval pool multiplier: the index is asked for `top_n * POOL_MULTIPLIER` chunks.
pub const POOL_MULTIPLIER: usize = 3;

pub const DEFAULT_SEMANTIC_WEIGHT: f32 = 0.35;
pub const DEFAULT_KEYWORD_WEIGHT: f32 = 0.35;
pub const DEFAULT_BENEFIT_WEIGHT: f32 = 0.30;

pub const DEFAULT_FUSED_MIN: f32 = 0.60;
pub const DEFAULT_FUSED_MAX: f32 = 0.95;

pub const DEFAULT_SIGMOID_CENTER: f32 = 2.0;
pub const DEFAULT_SIGMOID_SLOPE: f32 = 0.4;
pub const DEFAULT_SEMANTIC_FLOOR: f32 = 0.6;
pub const DEFAULT_SEMANTIC_CEILING: f32 = 0.9;

/// Token budget for keyword and intent prompts.
pub const DEFAULT_ANALYSIS_MAX_TOKENS: u32 = 200;

/// Token budget for the explanation prompt.
pub const DEFAULT_EXPLAIN_MAX_TOKENS: u32 = 800;

pub const DEFAULT_LLM_TEMPERATURE: f64 = 0.1;

/// Seconds a store read waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 30;

/// Placeholder used for missing display fields of a decision.
pub const UNKNOWN_FIELD: &str = "Bilinmiyor";

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: index expects {}, embedder produces {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that the embedder dimension matches the dimension stored in the index.
///
/// # Example
///
/// ```
/// use emsal::constants::validate_embedding_dim;
///
/// validate_embedding_dim(384, 384).unwrap();
/// assert!(validate_embedding_dim(768, 384).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 || actual == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let sum = DEFAULT_SEMANTIC_WEIGHT + DEFAULT_KEYWORD_WEIGHT + DEFAULT_BENEFIT_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_highlight_fits_in_browse_set() {
        assert!(HIGHLIGHT_COUNT <= DEFAULT_TOP_N);
        assert!(DEFAULT_TOP_N <= MAX_TOP_N);
    }

    #[test]
    fn test_validate_embedding_dim_match() {
        assert!(validate_embedding_dim(384, 384).is_ok());
    }

    #[test]
    fn test_validate_embedding_dim_zero() {
        assert_eq!(
            validate_embedding_dim(0, 384),
            Err(DimValidationError::ZeroDimension)
        );
    }

    #[test]
    fn test_validate_embedding_dim_mismatch() {
        assert_eq!(
            validate_embedding_dim(768, 384),
            Err(DimValidationError::DimensionMismatch {
                expected: 384,
                actual: 768
            })
        );
    }

    #[test]
    fn test_error_display() {
        let err = DimValidationError::DimensionMismatch {
            expected: 384,
            actual: 768,
        };
        assert!(err.to_string().contains("384"));
        assert!(err.to_string().contains("768"));
    }
}
