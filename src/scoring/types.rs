use serde::Serialize;

/// The three inputs to fusion, kept for display and explanation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    /// Calibrated semantic similarity.
    pub semantic: f32,
    /// Keyword overlap in `[0, 1]`.
    pub keyword: f32,
    /// Benefit heuristic in `[0, 1]`.
    pub benefit: f32,
}

impl ComponentScores {
    pub fn new(semantic: f32, keyword: f32, benefit: f32) -> Self {
        Self {
            semantic,
            keyword,
            benefit,
        }
    }
}

/// One retrieved chunk joined with its decision row and scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateResult {
    pub decision_id: i64,
    /// Position of the chunk in the index (and metadata sequence).
    pub chunk_index: usize,
    /// Fused ranking score.
    pub score: f32,
    pub components: ComponentScores,
    pub snippet: String,
    /// Issuing chamber (`daire`).
    pub chamber: String,
    /// Docket number (`esas`).
    pub esas: String,
    /// Decision number (`karar`).
    pub karar: String,
    /// Decision date as stored.
    pub date: String,
    pub full_text: String,
}

impl CandidateResult {
    #[inline]
    pub fn semantic_score(&self) -> f32 {
        self.components.semantic
    }

    #[inline]
    pub fn keyword_score(&self) -> f32 {
        self.components.keyword
    }

    #[inline]
    pub fn benefit_score(&self) -> f32 {
        self.components.benefit
    }

    /// `"esas/karar"` as cited in filings.
    pub fn case_numbers(&self) -> String {
        format!("{}/{}", self.esas, self.karar)
    }
}
