use tracing::{debug, warn};

use super::cache::AnalysisCache;
use super::fallback::fallback_keywords;
use super::intent::{GENERAL_CATEGORY_LABEL, QueryIntent};
use super::parser::{ParseOutcome, parse_intent, parse_keywords};
use super::prompts::{intent_prompt, keyword_prompt};
use crate::constants::DEFAULT_ANALYSIS_MAX_TOKENS;
use crate::llm::LanguageModel;

/// Derives keywords and intent from a case description.
///
/// Results are memoized in the [`AnalysisCache`] passed by the caller; the model is
/// optional and every model failure resolves to a deterministic fallback.
#[derive(Debug, Clone)]
pub struct QueryAnalyzer {
    max_tokens: u32,
}

impl Default for QueryAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_MAX_TOKENS)
    }
}

impl QueryAnalyzer {
    pub fn new(max_tokens: u32) -> Self {
        Self { max_tokens }
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Returns the keyword list for `query`.
    ///
    /// Never empty for a query containing at least one word longer than three
    /// characters: when the model path yields nothing, the fallback tiers run.
    pub async fn extract_keywords<L: LanguageModel>(
        &self,
        query: &str,
        cache: &AnalysisCache,
        llm: Option<&L>,
    ) -> Vec<String> {
        if let Some(keywords) = cache.keywords(query) {
            debug!(count = keywords.len(), "Keyword cache hit");
            return keywords;
        }

        let keywords = match self.ask(llm, &keyword_prompt(query)).await {
            Some(answer) => match parse_keywords(&answer) {
                ParseOutcome::WellFormed(keywords) => keywords,
                ParseOutcome::Malformed { reason } => {
                    warn!(reason, "Unusable keyword answer, using fallback");
                    fallback_keywords(query)
                }
            },
            None => fallback_keywords(query),
        };

        debug!(keywords = ?keywords, "Extracted keywords");
        cache.insert_keywords(query, keywords.clone());
        keywords
    }

    /// Returns the intent for `query`, or [`QueryIntent::fallback`] when the model is
    /// absent, fails, or answers without any recognizable field.
    pub async fn extract_intent<L: LanguageModel>(
        &self,
        query: &str,
        cache: &AnalysisCache,
        llm: Option<&L>,
    ) -> QueryIntent {
        if let Some(intent) = cache.intent(query) {
            debug!(category = %intent.category_label, "Intent cache hit");
            return intent;
        }

        let intent = match self.ask(llm, &intent_prompt(query)).await {
            Some(answer) => match parse_intent(&answer) {
                ParseOutcome::WellFormed(parsed) => QueryIntent::new(
                    parsed
                        .case_type
                        .unwrap_or_else(|| GENERAL_CATEGORY_LABEL.to_string()),
                    parsed.main_topic.unwrap_or_default(),
                    parsed.search_terms.unwrap_or_default(),
                ),
                ParseOutcome::Malformed { reason } => {
                    warn!(reason, "Unusable intent answer, using fallback");
                    QueryIntent::fallback(query)
                }
            },
            None => QueryIntent::fallback(query),
        };

        debug!(
            category = %intent.category_label,
            is_criminal = intent.is_criminal,
            terms = intent.search_terms.len(),
            "Extracted intent"
        );
        cache.insert_intent(query, intent.clone());
        intent
    }

    async fn ask<L: LanguageModel>(&self, llm: Option<&L>, prompt: &str) -> Option<String> {
        let llm = llm?;
        match llm.complete(prompt, self.max_tokens).await {
            Ok(answer) => Some(answer),
            Err(e) => {
                warn!(error = %e, "Language model unavailable, using fallback");
                None
            }
        }
    }
}
