//! Per-search memoization of query analysis.
//!
//! Entries are keyed by a BLAKE3 hash of the exact raw query and hold keywords and
//! intent independently. The orchestrator clears the cache at the start of every
//! search, so nothing survives from one top-level call to the next.

use moka::sync::Cache;

use super::intent::QueryIntent;
use crate::hashing::hash_query;

#[derive(Debug, Clone, Default)]
struct AnalysisEntry {
    keywords: Option<Vec<String>>,
    intent: Option<QueryIntent>,
}

/// Keyword and intent results for the queries seen in the current search.
pub struct AnalysisCache {
    entries: Cache<[u8; 32], AnalysisEntry>,
}

impl AnalysisCache {
    const DEFAULT_CAPACITY: u64 = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub fn keywords(&self, query: &str) -> Option<Vec<String>> {
        self.entries.get(&hash_query(query))?.keywords
    }

    pub fn intent(&self, query: &str) -> Option<QueryIntent> {
        self.entries.get(&hash_query(query))?.intent
    }

    /// Stores keywords, keeping any intent already cached for `query`.
    pub fn insert_keywords(&self, query: &str, keywords: Vec<String>) {
        let hash = hash_query(query);
        let mut entry = self.entries.get(&hash).unwrap_or_default();
        entry.keywords = Some(keywords);
        self.entries.insert(hash, entry);
    }

    /// Stores intent, keeping any keywords already cached for `query`.
    pub fn insert_intent(&self, query: &str, intent: QueryIntent) {
        let hash = hash_query(query);
        let mut entry = self.entries.get(&hash).unwrap_or_default();
        entry.intent = Some(intent);
        self.entries.insert(hash, entry);
    }

    pub fn contains_query(&self, query: &str) -> bool {
        self.entries.contains_key(&hash_query(query))
    }

    /// Drops every entry. Lookups after this call never observe earlier entries.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Number of queries with cached analysis (exact after [`Self::run_pending_tasks`]).
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnalysisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
