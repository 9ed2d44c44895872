use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

use super::error::StoreError;
use super::{DecisionRecord, DecisionStore};

/// In-memory store for tests. Ids marked failing return [`StoreError::Unavailable`].
#[derive(Default)]
pub struct MockDecisionStore {
    records: RwLock<HashMap<i64, DecisionRecord>>,
    failing: RwLock<HashSet<i64>>,
    lookups: RwLock<Vec<i64>>,
}

impl MockDecisionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = DecisionRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn insert(&self, record: DecisionRecord) {
        self.records.write().insert(record.id, record);
    }

    pub fn fail_on(&self, id: i64) {
        self.failing.write().insert(id);
    }

    /// Ids looked up so far, in order.
    pub fn lookups(&self) -> Vec<i64> {
        self.lookups.read().clone()
    }
}

impl DecisionStore for MockDecisionStore {
    fn fetch(&self, id: i64) -> Result<Option<DecisionRecord>, StoreError> {
        self.lookups.write().push(id);
        if self.failing.read().contains(&id) {
            return Err(StoreError::Unavailable {
                reason: format!("injected failure for id {id}"),
            });
        }
        Ok(self.records.read().get(&id).cloned())
    }
}
