//! Rationale for citing the highlighted precedents.
//!
//! The model writes the explanation when it can; otherwise a fixed template lists the
//! same decisions with their scores. Some text is always returned.

pub mod prompt;


pub use prompt::{explanation_prompt, fallback_explanation, format_percent};

use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::{DEFAULT_EXPLAIN_MAX_TOKENS, HIGHLIGHT_COUNT};
use crate::llm::LanguageModel;
use crate::scoring::CandidateResult;

/// Returned when fewer than three candidates are available.
pub const INSUFFICIENT_PRECEDENTS_MESSAGE: &str = "Yeterli emsal karar bulunamadı.";

/// Where an explanation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    Model,
    Fallback,
    /// Highlight set was short; the text is [`INSUFFICIENT_PRECEDENTS_MESSAGE`].
    Insufficient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub text: String,
    pub source: ExplanationSource,
}

impl Explanation {
    fn insufficient() -> Self {
        Self {
            text: INSUFFICIENT_PRECEDENTS_MESSAGE.to_string(),
            source: ExplanationSource::Insufficient,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Explainer {
    max_tokens: u32,
}

impl Default for Explainer {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLAIN_MAX_TOKENS)
    }
}

impl Explainer {
    pub fn new(max_tokens: u32) -> Self {
        Self { max_tokens }
    }

    /// Explains how to use `top` (the highlight set) for `query`.
    ///
    /// Fewer than three candidates yields the insufficient-precedents message without
    /// calling the model. Only the first three candidates are considered.
    pub async fn explain<L: LanguageModel>(
        &self,
        query: &str,
        top: &[CandidateResult],
        llm: Option<&L>,
    ) -> Explanation {
        if top.len() < HIGHLIGHT_COUNT {
            debug!(available = top.len(), "Too few precedents to explain");
            return Explanation::insufficient();
        }
        let top = &top[..HIGHLIGHT_COUNT];

        let Some(llm) = llm else {
            return fallback(top);
        };

        match llm.complete(&explanation_prompt(query, top), self.max_tokens).await {
            Ok(text) if !text.trim().is_empty() => Explanation {
                text,
                source: ExplanationSource::Model,
            },
            Ok(_) => {
                warn!("Empty explanation from model, using template");
                fallback(top)
            }
            Err(e) => {
                warn!(error = %e, "Explanation failed, using template");
                fallback(top)
            }
        }
    }
}

fn fallback(top: &[CandidateResult]) -> Explanation {
    Explanation {
        text: fallback_explanation(top),
        source: ExplanationSource::Fallback,
    }
}
