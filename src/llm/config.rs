use crate::constants::{
    DEFAULT_ANALYSIS_MAX_TOKENS, DEFAULT_EXPLAIN_MAX_TOKENS, DEFAULT_LLM_TEMPERATURE,
};

use super::error::LlmError;

/// Model selection and generation limits.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// Provider model name, resolved by `genai` (e.g. `gpt-4o-mini`, `llama3.1:8b`).
    pub model: String,
    /// Token cap for keyword and intent prompts.
    pub analysis_max_tokens: u32,
    /// Token cap for the explanation prompt.
    pub explain_max_tokens: u32,
    pub temperature: f64,
}

impl LlmConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            analysis_max_tokens: DEFAULT_ANALYSIS_MAX_TOKENS,
            explain_max_tokens: DEFAULT_EXPLAIN_MAX_TOKENS,
            temperature: DEFAULT_LLM_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, analysis: u32, explain: u32) -> Self {
        self.analysis_max_tokens = analysis;
        self.explain_max_tokens = explain;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn validate(&self) -> Result<(), LlmError> {
        if self.model.trim().is_empty() {
            return Err(LlmError::InvalidConfig {
                reason: "model name must not be empty".to_string(),
            });
        }
        if self.analysis_max_tokens == 0 || self.explain_max_tokens == 0 {
            return Err(LlmError::InvalidConfig {
                reason: "max_tokens must be positive".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::InvalidConfig {
                reason: format!("temperature {} outside [0, 2]", self.temperature),
            });
        }
        Ok(())
    }
}
