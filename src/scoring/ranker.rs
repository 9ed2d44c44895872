use std::cmp::Ordering;

use tracing::debug;

use crate::constants::{DEFAULT_TOP_N, HIGHLIGHT_COUNT};

use super::types::CandidateResult;

/// Sorts candidates by fused score, descending.
///
/// The sort is stable: equal scores keep retrieval order.
pub fn rank_candidates(mut candidates: Vec<CandidateResult>) -> Vec<CandidateResult> {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates
}

/// A fully ranked candidate pool with prefix views for the browse and highlight sets.
#[derive(Debug, Clone)]
pub struct Ranking {
    ranked: Vec<CandidateResult>,
    top_n: usize,
    highlight: usize,
}

impl Ranking {
    /// Ranks `candidates` using the default browse (20) and highlight (3) sizes.
    pub fn new(candidates: Vec<CandidateResult>) -> Self {
        Self::with_sizes(candidates, DEFAULT_TOP_N, HIGHLIGHT_COUNT)
    }

    /// Ranks `candidates`; `highlight` is capped at `top_n` so it stays a prefix.
    pub fn with_sizes(candidates: Vec<CandidateResult>, top_n: usize, highlight: usize) -> Self {
        let ranked = rank_candidates(candidates);

        debug!(
            total = ranked.len(),
            top_score = ranked.first().map(|c| c.score),
            "Ranked candidate pool"
        );

        Self {
            ranked,
            top_n,
            highlight: highlight.min(top_n),
        }
    }

    /// Every candidate in rank order.
    pub fn all(&self) -> &[CandidateResult] {
        &self.ranked
    }

    /// The first `top_n` candidates (fewer when the pool is smaller).
    pub fn browse(&self) -> &[CandidateResult] {
        &self.ranked[..self.top_n.min(self.ranked.len())]
    }

    /// The first `highlight` candidates; shorter than requested when the pool is small.
    pub fn highlight(&self) -> &[CandidateResult] {
        &self.ranked[..self.highlight.min(self.ranked.len())]
    }

    /// Returns `true` when the pool cannot fill the highlight set.
    pub fn is_highlight_short(&self) -> bool {
        self.ranked.len() < self.highlight
    }

    pub fn total(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}
