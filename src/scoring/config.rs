use crate::constants::{
    DEFAULT_SEMANTIC_CEILING, DEFAULT_SEMANTIC_FLOOR, DEFAULT_SIGMOID_CENTER, DEFAULT_SIGMOID_SLOPE,
};

use super::error::ScoringError;
use super::fusion::FusionConfig;

/// Maps raw inner-product similarities into a fixed display band.
///
/// Raw inner products are unbounded and not comparable across queries. The value is
/// squashed with `sigmoid((raw - center) * slope)` and rescaled to
/// `floor + sigmoid * (ceiling - floor)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityCalibration {
    /// Raw similarity mapped to the middle of the band. Default: `2.0`.
    pub center: f32,
    /// Steepness of the logistic curve. Default: `0.4`.
    pub slope: f32,
    /// Lowest calibrated value. Default: `0.6`.
    pub floor: f32,
    /// Highest calibrated value. Default: `0.9`.
    pub ceiling: f32,
}

impl Default for SimilarityCalibration {
    fn default() -> Self {
        Self {
            center: DEFAULT_SIGMOID_CENTER,
            slope: DEFAULT_SIGMOID_SLOPE,
            floor: DEFAULT_SEMANTIC_FLOOR,
            ceiling: DEFAULT_SEMANTIC_CEILING,
        }
    }
}

impl SimilarityCalibration {
    /// Calibrates a raw similarity into `[floor, ceiling]`.
    ///
    /// Computed in `f64`; the result is clamped to the band so f32 rounding never
    /// lands outside it.
    #[inline]
    pub fn calibrate(&self, raw: f32) -> f32 {
        let offset = (f64::from(raw) - f64::from(self.center)) * f64::from(self.slope);
        let squashed = 1.0 / (1.0 + (-offset).exp());
        let floor = f64::from(self.floor);
        let value = floor + squashed * (f64::from(self.ceiling) - floor);
        (value as f32).max(self.floor).min(self.ceiling)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if !self.slope.is_finite() || self.slope <= 0.0 {
            return Err(ScoringError::InvalidConfig {
                reason: format!("sigmoid slope must be positive, got {}", self.slope),
            });
        }
        if !self.center.is_finite() {
            return Err(ScoringError::InvalidConfig {
                reason: "sigmoid center must be finite".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.floor)
            || !(0.0..=1.0).contains(&self.ceiling)
            || self.floor > self.ceiling
        {
            return Err(ScoringError::InvalidConfig {
                reason: format!(
                    "semantic band [{}, {}] must lie within [0, 1]",
                    self.floor, self.ceiling
                ),
            });
        }
        Ok(())
    }
}

/// Calibration and fusion parameters for one retriever.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoringConfig {
    pub calibration: SimilarityCalibration,
    pub fusion: FusionConfig,
}

impl ScoringConfig {
    pub fn with_calibration(mut self, calibration: SimilarityCalibration) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn with_fusion(mut self, fusion: FusionConfig) -> Self {
        self.fusion = fusion;
        self
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        self.calibration.validate()?;
        self.fusion.validate()
    }
}
