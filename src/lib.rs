//! Emsal: retrieval and ranking of Turkish court decisions as persuasive precedent.
//!
//! A search turns a free-text case description into keywords and an intent, retrieves
//! semantically close decision chunks from a prebuilt index, scores each candidate on
//! semantic similarity, keyword overlap and a rule-based "benefit" heuristic, ranks the
//! fused scores, and explains how to use the top three.
//!
//! # Public API Surface
//!
//! ## Entry point
//! - [`PrecedentRetriever`], [`DefaultRetriever`], [`RankedResult`], [`RetrieverError`]
//! - [`Config`], [`ConfigError`]
//!
//! ## Components
//! - [`QueryAnalyzer`], [`AnalysisCache`], [`QueryIntent`], [`CaseCategory`]
//! - [`SemanticSearcher`], [`SentenceEmbedder`], [`FlatIpIndex`], [`ChunkMetadata`]
//! - [`BenefitScorer`], [`FusionConfig`], [`SimilarityCalibration`], [`Ranking`]
//! - [`Explainer`]
//!
//! ## Collaborator seams
//! - [`Embedder`], [`VectorIndex`], [`DecisionStore`], [`LanguageModel`]
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod explain;
pub mod hashing;
pub mod index;
pub mod llm;
pub mod retriever;
pub mod scoring;
pub mod search;
pub mod store;

pub use analysis::{AnalysisCache, CaseCategory, QueryAnalyzer, QueryIntent};
pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use embedding::{Embedder, EmbedderConfig, EmbeddingError, SentenceEmbedder};
pub use explain::{
    Explainer, Explanation, ExplanationSource, INSUFFICIENT_PRECEDENTS_MESSAGE,
    fallback_explanation,
};
pub use hashing::{hash_query, hash_to_u64};
pub use index::{ChunkMetadata, FlatIpIndex, IndexError, IndexHit, VectorIndex};
pub use llm::{GenaiLanguageModel, LanguageModel, LlmConfig, LlmError};
pub use retriever::{DefaultRetriever, PrecedentRetriever, RankedResult, RetrieverError};
pub use scoring::{
    BenefitScorer, BenefitVocabulary, CandidateResult, ComponentScores, FusionConfig, Ranking,
    ScoringConfig, ScoringError, SimilarityCalibration, keyword_match_score, rank_candidates,
};
pub use search::{SearchError, SemanticHit, SemanticSearcher};
pub use store::{DecisionRecord, DecisionStore, SqliteDecisionStore, StoreError};

#[cfg(any(test, feature = "mock"))]
pub use index::MockVectorIndex;
#[cfg(any(test, feature = "mock"))]
pub use llm::MockLanguageModel;
#[cfg(any(test, feature = "mock"))]
pub use store::MockDecisionStore;
