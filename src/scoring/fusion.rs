use crate::constants::{
    DEFAULT_BENEFIT_WEIGHT, DEFAULT_FUSED_MAX, DEFAULT_FUSED_MIN, DEFAULT_KEYWORD_WEIGHT,
    DEFAULT_SEMANTIC_WEIGHT,
};

use super::error::ScoringError;
use super::types::ComponentScores;

/// Weighted linear fusion of the three component scores, clamped to a fixed band.
///
/// The clamp keeps every surfaced precedent away from both "worthless" and "certain".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionConfig {
    pub semantic_weight: f32,
    pub keyword_weight: f32,
    pub benefit_weight: f32,
    /// Lower clamp bound. Default: `0.60`.
    pub min_score: f32,
    /// Upper clamp bound. Default: `0.95`.
    pub max_score: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            semantic_weight: DEFAULT_SEMANTIC_WEIGHT,
            keyword_weight: DEFAULT_KEYWORD_WEIGHT,
            benefit_weight: DEFAULT_BENEFIT_WEIGHT,
            min_score: DEFAULT_FUSED_MIN,
            max_score: DEFAULT_FUSED_MAX,
        }
    }
}

impl FusionConfig {
    pub fn with_weights(mut self, semantic: f32, keyword: f32, benefit: f32) -> Self {
        self.semantic_weight = semantic;
        self.keyword_weight = keyword;
        self.benefit_weight = benefit;
        self
    }

    pub fn with_bounds(mut self, min_score: f32, max_score: f32) -> Self {
        self.min_score = min_score;
        self.max_score = max_score;
        self
    }

    /// Fuses the three component scores into one ranking value.
    #[inline]
    pub fn fuse(&self, semantic: f32, keyword: f32, benefit: f32) -> f32 {
        let raw = semantic * self.semantic_weight
            + keyword * self.keyword_weight
            + benefit * self.benefit_weight;
        raw.min(self.max_score).max(self.min_score)
    }

    #[inline]
    pub fn fuse_components(&self, scores: &ComponentScores) -> f32 {
        self.fuse(scores.semantic, scores.keyword, scores.benefit)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        let weights = [
            self.semantic_weight,
            self.keyword_weight,
            self.benefit_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ScoringError::InvalidConfig {
                reason: format!("fusion weights must be non-negative, got {:?}", weights),
            });
        }
        if !(0.0..=1.0).contains(&self.min_score)
            || !(0.0..=1.0).contains(&self.max_score)
            || self.min_score > self.max_score
        {
            return Err(ScoringError::InvalidConfig {
                reason: format!(
                    "fused bounds [{}, {}] must be ordered and within [0, 1]",
                    self.min_score, self.max_score
                ),
            });
        }
        Ok(())
    }
}
