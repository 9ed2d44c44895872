use parking_lot::Mutex;

use super::*;
use crate::embedding::{EmbedderConfig, EmbeddingError, SentenceEmbedder};
use crate::index::{IndexHit, MockVectorIndex};

/// Returns a fixed vector and records every text it was asked to embed.
struct RecordingEmbedder {
    dim: usize,
    texts: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingEmbedder {
    fn new(dim: usize) -> Self {
        Self {
            dim,
            texts: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    fn failing(dim: usize) -> Self {
        Self {
            fail: true,
            ..Self::new(dim)
        }
    }
}

impl Embedder for RecordingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.texts.lock().push(text.to_string());
        if self.fail {
            return Err(EmbeddingError::InferenceFailed {
                reason: "test".to_string(),
            });
        }
        let mut v = vec![0.0; self.dim];
        v[0] = 1.0;
        Ok(v)
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }
}

fn metadata(n: usize) -> Vec<ChunkMetadata> {
    (0..n)
        .map(|i| ChunkMetadata::new(100 + i as i64, format!("parça {i}")))
        .collect()
}

fn hit(position: usize, score: f32) -> IndexHit {
    IndexHit { position, score }
}

#[test]
fn test_enhanced_query() {
    let terms = vec!["nafaka".to_string(), "artırım".to_string()];
    assert_eq!(enhanced_query("dava", &terms), "dava nafaka artırım");
    assert_eq!(enhanced_query("dava", &[]), "dava");
}

#[test]
fn test_search_embeds_enhanced_query_and_requests_top_k() {
    let index = MockVectorIndex::with_rows(3, vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
    let searcher = SemanticSearcher::new(
        RecordingEmbedder::new(3),
        index,
        metadata(2),
        SimilarityCalibration::default(),
    )
    .unwrap();

    let terms = vec!["nafaka".to_string()];
    let hits = searcher.search("boşanma", &terms, 60).unwrap();

    assert_eq!(searcher.embedder().texts.lock().as_slice(), ["boşanma nafaka"]);
    assert_eq!(searcher.index().queries()[0].1, 60);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].chunk_index, 0);
    assert_eq!(hits[0].decision_id, 100);
    assert_eq!(hits[0].snippet, "parça 0");
}

#[test]
fn test_search_calibrates_scores() {
    let index = MockVectorIndex::new(3).with_scripted_hits(vec![hit(0, 2.0), hit(1, -3.0)]);
    let calibration = SimilarityCalibration::default();
    let searcher =
        SemanticSearcher::new(RecordingEmbedder::new(3), index, metadata(2), calibration).unwrap();

    let hits = searcher.search("q", &[], 10).unwrap();
    assert!((hits[0].semantic_score - 0.75).abs() < 1e-5);
    assert_eq!(hits[1].raw_similarity, -3.0);
    for hit in &hits {
        assert!((0.6..=0.9).contains(&hit.semantic_score));
    }
}

#[test]
fn test_search_drops_positions_without_metadata() {
    let index = MockVectorIndex::new(3).with_scripted_hits(vec![
        hit(1, 0.9),
        hit(7, 0.8),
        hit(0, 0.7),
    ]);
    let searcher = SemanticSearcher::new(
        RecordingEmbedder::new(3),
        index,
        metadata(2),
        SimilarityCalibration::default(),
    )
    .unwrap();

    let hits = searcher.search("q", &[], 10).unwrap();
    let positions: Vec<_> = hits.iter().map(|h| h.chunk_index).collect();
    assert_eq!(positions, [1, 0]);
}

#[test]
fn test_search_embedding_failure_is_error() {
    let searcher = SemanticSearcher::new(
        RecordingEmbedder::failing(3),
        MockVectorIndex::new(3),
        metadata(0),
        SimilarityCalibration::default(),
    )
    .unwrap();

    assert!(matches!(
        searcher.search("q", &[], 5),
        Err(SearchError::Embedding(_))
    ));
}

#[test]
fn test_new_rejects_dimension_mismatch() {
    let result = SemanticSearcher::new(
        RecordingEmbedder::new(4),
        MockVectorIndex::new(3),
        metadata(0),
        SimilarityCalibration::default(),
    );
    assert!(matches!(result, Err(SearchError::Dimension(_))));
}

#[test]
fn test_search_with_stub_embedder() {
    let embedder = SentenceEmbedder::load(EmbedderConfig::stub().with_stub_dim(8)).unwrap();
    let query_vector = embedder.embed("nafaka").unwrap();
    let rows = vec![vec![0.0; 8], query_vector];
    let searcher = SemanticSearcher::new(
        embedder,
        MockVectorIndex::with_rows(8, rows),
        metadata(2),
        SimilarityCalibration::default(),
    )
    .unwrap();

    let hits = searcher.search("nafaka", &[], 2).unwrap();
    assert_eq!(hits[0].chunk_index, 1);
    assert!((hits[0].raw_similarity - 1.0).abs() < 1e-4);
}
