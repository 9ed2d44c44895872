//! Candidate scoring: keyword overlap, benefit heuristic, fusion and ranking.
//!
//! Everything here is a pure function over already-fetched data, so the whole
//! module is deterministic and can be tested without models or stores.
//!
//! # Score Bands
//!
//! | Score | Range | Source |
//! |-------|-------|--------|
//! | semantic | `[floor, ceiling]` (default `[0.6, 0.9]`) | [`SimilarityCalibration`] |
//! | keyword | `[0, 1]` | [`keyword_match_score`] |
//! | benefit | `[0, 1]` | [`BenefitScorer`] |
//! | fused | `[min, max]` (default `[0.60, 0.95]`) | [`FusionConfig`] |

pub mod benefit;
pub mod config;
pub mod error;
pub mod fusion;
pub mod lexical;
pub mod ranker;
pub mod types;


pub use benefit::{BenefitScorer, BenefitVocabulary};
pub use config::{ScoringConfig, SimilarityCalibration};
pub use error::ScoringError;
pub use fusion::FusionConfig;
pub use lexical::keyword_match_score;
pub use ranker::{Ranking, rank_candidates};
pub use types::{CandidateResult, ComponentScores};
