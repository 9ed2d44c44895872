//! The public search operation.
//!
//! [`PrecedentRetriever::search_beneficial_precedents`] runs one search end to end:
//! analysis, semantic retrieval, per-candidate scoring, ranking, explanation.

pub mod error;


pub use error::RetrieverError;

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::analysis::{AnalysisCache, QueryAnalyzer, QueryIntent};
use crate::config::Config;
use crate::constants::{HIGHLIGHT_COUNT, POOL_MULTIPLIER};
use crate::embedding::{Embedder, SentenceEmbedder};
use crate::explain::{Explainer, ExplanationSource};
use crate::index::{FlatIpIndex, VectorIndex, load_chunk_metadata};
use crate::llm::{GenaiLanguageModel, LanguageModel};
use crate::scoring::{
    BenefitScorer, CandidateResult, ComponentScores, FusionConfig, Ranking, keyword_match_score,
};
use crate::search::{SemanticHit, SemanticSearcher};
use crate::store::{DecisionStore, SqliteDecisionStore};

/// Output of one search.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    /// Browse set: the first `top_n` candidates by fused score.
    pub top_20_results: Vec<CandidateResult>,
    /// Highlight set: a prefix of `top_20_results`, shorter than 3 when the pool is.
    pub top_3_results: Vec<CandidateResult>,
    pub explanation: String,
    pub explanation_source: ExplanationSource,
    pub intent: QueryIntent,
    pub keywords: Vec<String>,
    /// Size of the full candidate pool before slicing.
    pub total_found: usize,
}

/// Retriever wired to the on-disk index, SQLite store and an optional `genai` model.
pub type DefaultRetriever =
    PrecedentRetriever<SentenceEmbedder, FlatIpIndex, SqliteDecisionStore, GenaiLanguageModel>;

/// Retrieval engine over an embedder, index, decision store and optional model.
///
/// Searches take `&self` but share one [`AnalysisCache`] that each search clears on
/// entry; run searches on one retriever sequentially.
pub struct PrecedentRetriever<E, I, S, L> {
    searcher: SemanticSearcher<E, I>,
    store: S,
    llm: Option<L>,
    analyzer: QueryAnalyzer,
    explainer: Explainer,
    benefit: BenefitScorer,
    fusion: FusionConfig,
    cache: AnalysisCache,
    top_n: usize,
}

impl DefaultRetriever {
    /// Opens every resource named by `config`.
    ///
    /// Fails if the index, metadata, database or embedder cannot be loaded, or if the
    /// embedder and index dimensions differ.
    pub fn open(config: &Config) -> Result<Self, RetrieverError> {
        config.scoring.validate().map_err(crate::config::ConfigError::from)?;

        let embedder = SentenceEmbedder::load(config.embedder_config())?;
        let index = FlatIpIndex::open(&config.index_path)?;
        let metadata = load_chunk_metadata(&config.meta_path)?;
        let store = SqliteDecisionStore::open(&config.db_path)?
            .with_busy_timeout(Duration::from_secs(config.busy_timeout_secs));

        let llm = match config.llm_config() {
            Some(llm_config) => {
                info!(model = %llm_config.model, "Language model enabled");
                Some(GenaiLanguageModel::new(llm_config)?)
            }
            None => {
                info!("No language model configured, using deterministic fallbacks");
                None
            }
        };

        let searcher =
            SemanticSearcher::new(embedder, index, metadata, config.scoring.calibration)?;

        Ok(Self::new(searcher, store, llm)
            .with_fusion(config.scoring.fusion)
            .with_top_n(config.top_n)
            .with_token_budgets(config.analysis_max_tokens, config.explain_max_tokens))
    }
}

impl<E, I, S, L> PrecedentRetriever<E, I, S, L>
where
    E: Embedder,
    I: VectorIndex,
    S: DecisionStore,
    L: LanguageModel,
{
    pub fn new(searcher: SemanticSearcher<E, I>, store: S, llm: Option<L>) -> Self {
        Self {
            searcher,
            store,
            llm,
            analyzer: QueryAnalyzer::default(),
            explainer: Explainer::default(),
            benefit: BenefitScorer::default(),
            fusion: FusionConfig::default(),
            cache: AnalysisCache::new(),
            top_n: crate::constants::DEFAULT_TOP_N,
        }
    }

    pub fn with_fusion(mut self, fusion: FusionConfig) -> Self {
        self.fusion = fusion;
        self
    }

    pub fn with_benefit_scorer(mut self, benefit: BenefitScorer) -> Self {
        self.benefit = benefit;
        self
    }

    /// Browse-set size; retrieval requests three times as many chunks. Clamped to 1.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }

    pub fn with_token_budgets(mut self, analysis: u32, explain: u32) -> Self {
        self.analyzer = QueryAnalyzer::new(analysis);
        self.explainer = Explainer::new(explain);
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn has_language_model(&self) -> bool {
        self.llm.is_some()
    }

    pub fn searcher(&self) -> &SemanticSearcher<E, I> {
        &self.searcher
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn language_model(&self) -> Option<&L> {
        self.llm.as_ref()
    }

    /// Analysis memoized by the current (or last) search.
    pub fn analysis_cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// Finds, ranks and explains the precedents most useful for `case_description`.
    ///
    /// Returns an error only when the query cannot be embedded or the index search
    /// fails. Candidates whose decision row is missing or unreadable are dropped.
    #[instrument(skip_all, fields(query_len = case_description.len()))]
    pub async fn search_beneficial_precedents(
        &self,
        case_description: &str,
    ) -> Result<RankedResult, RetrieverError> {
        self.cache.clear();
        let llm = self.llm.as_ref();

        let keywords = self
            .analyzer
            .extract_keywords(case_description, &self.cache, llm)
            .await;
        let intent = self
            .analyzer
            .extract_intent(case_description, &self.cache, llm)
            .await;
        info!(
            keywords = ?keywords,
            case_type = %intent.category_label,
            main_topic = %intent.main_topic,
            "Query analyzed"
        );

        let hits = self.searcher.search(
            case_description,
            &intent.search_terms,
            self.top_n.saturating_mul(POOL_MULTIPLIER),
        )?;

        let candidates: Vec<CandidateResult> = hits
            .into_iter()
            .filter_map(|hit| self.score_hit(hit, &keywords))
            .collect();

        let ranking = Ranking::with_sizes(candidates, self.top_n, HIGHLIGHT_COUNT);
        if ranking.is_highlight_short() {
            warn!(
                found = ranking.total(),
                "Fewer than {} precedents found", HIGHLIGHT_COUNT
            );
        }

        let explanation = self
            .explainer
            .explain(case_description, ranking.highlight(), llm)
            .await;

        info!(
            total_found = ranking.total(),
            explanation = ?explanation.source,
            "Search complete"
        );

        Ok(RankedResult {
            top_20_results: ranking.browse().to_vec(),
            top_3_results: ranking.highlight().to_vec(),
            explanation: explanation.text,
            explanation_source: explanation.source,
            intent,
            keywords,
            total_found: ranking.total(),
        })
    }

    /// Joins a hit with its decision row and scores it; `None` drops the candidate.
    fn score_hit(&self, hit: SemanticHit, keywords: &[String]) -> Option<CandidateResult> {
        let record = match self.store.fetch(hit.decision_id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(id = hit.decision_id, "Decision row missing, skipping candidate");
                return None;
            }
            Err(e) => {
                warn!(id = hit.decision_id, error = %e, "Decision lookup failed, skipping candidate");
                return None;
            }
        };

        let text = if record.text().is_empty() {
            hit.snippet.as_str()
        } else {
            record.text()
        };
        let court = record.chamber.as_deref().unwrap_or("");

        let components = ComponentScores::new(
            hit.semantic_score,
            keyword_match_score(text, keywords),
            self.benefit.score(text, court),
        );
        let score = self.fusion.fuse_components(&components);

        debug!(
            id = hit.decision_id,
            chunk = hit.chunk_index,
            score,
            semantic = components.semantic,
            keyword = components.keyword,
            benefit = components.benefit,
            "Scored candidate"
        );

        Some(CandidateResult {
            decision_id: hit.decision_id,
            chunk_index: hit.chunk_index,
            score,
            components,
            chamber: record.chamber_or_unknown().to_string(),
            esas: record.esas_or_unknown().to_string(),
            karar: record.karar_or_unknown().to_string(),
            date: record.date_or_unknown().to_string(),
            full_text: record.text().to_string(),
            snippet: hit.snippet,
        })
    }
}
