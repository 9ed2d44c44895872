//! Query understanding: keyword extraction and case intent, LLM-first with
//! deterministic fallbacks, memoized per raw query inside one search.

pub mod analyzer;
pub mod cache;
pub mod fallback;
pub mod intent;
pub mod parser;
pub mod prompts;

#[cfg(test)]
mod tests;

pub use analyzer::QueryAnalyzer;
pub use cache::AnalysisCache;
pub use fallback::{fallback_keywords, fallback_search_terms};
pub use intent::{CaseCategory, QueryIntent};
pub use parser::{KEYWORDS_MARKER, ParseOutcome, ParsedIntent, parse_intent, parse_keywords};
