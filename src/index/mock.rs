use std::cmp::Ordering;

use parking_lot::Mutex;

use super::error::IndexError;
use super::flat::inner_product;
use super::{IndexHit, VectorIndex};

/// In-memory index for tests.
///
/// Searches its rows exactly like [`super::FlatIpIndex`] unless a scripted hit list is
/// set, in which case that list is returned verbatim (truncated to `k`). Scripted hits
/// may point past the end of the metadata to exercise stale-position handling.
#[derive(Default)]
pub struct MockVectorIndex {
    dim: usize,
    rows: Vec<Vec<f32>>,
    scripted: Option<Vec<IndexHit>>,
    queries: Mutex<Vec<(Vec<f32>, usize)>>,
}

impl MockVectorIndex {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Default::default()
        }
    }

    pub fn with_rows(dim: usize, rows: Vec<Vec<f32>>) -> Self {
        Self {
            dim,
            rows,
            ..Default::default()
        }
    }

    /// Makes every search return `hits`.
    pub fn with_scripted_hits(mut self, hits: Vec<IndexHit>) -> Self {
        self.scripted = Some(hits);
        self
    }

    /// `(query, k)` pairs received so far.
    pub fn queries(&self) -> Vec<(Vec<f32>, usize)> {
        self.queries.lock().clone()
    }
}

impl VectorIndex for MockVectorIndex {
    fn dim(&self) -> usize {
        self.dim
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<IndexHit>, IndexError> {
        if query.len() != self.dim {
            return Err(IndexError::InvalidDimension {
                expected: self.dim,
                actual: query.len(),
            });
        }
        self.queries.lock().push((query.to_vec(), k));

        if let Some(scripted) = &self.scripted {
            return Ok(scripted.iter().take(k).copied().collect());
        }

        let mut hits: Vec<IndexHit> = self
            .rows
            .iter()
            .enumerate()
            .map(|(position, row)| IndexHit {
                position,
                score: inner_product(query, row),
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }
}
