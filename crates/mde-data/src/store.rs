//! In-memory record store

use std::sync::Arc;

use tracing::debug;

use mde_core::{Record, RecordStore};

/// A record store holding the whole dataset in memory
///
/// Built once at load time and immutable afterwards. Iteration order is the
/// order records were supplied in, which downstream views preserve.
pub struct MemoryStore {
    source_name: String,
    records: Vec<Arc<Record>>,
}

impl MemoryStore {
    /// Build a store from loaded records
    pub fn new(source_name: impl Into<String>, records: Vec<Record>) -> Self {
        let source_name = source_name.into();
        let records: Vec<_> = records.into_iter().map(Arc::new).collect();
        debug!(
            source = %source_name,
            records = records.len(),
            "in-memory store loaded"
        );
        Self {
            source_name,
            records,
        }
    }
}

impl RecordStore for MemoryStore {
    fn all(&self) -> Box<dyn Iterator<Item = Arc<Record>> + '_> {
        Box::new(self.records.iter().cloned())
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn source_name(&self) -> &str {
        &self.source_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mde_core::FieldValue;

    fn sample_records() -> Vec<Record> {
        [(10_u64, 7.5), (11, 5.0), (12, 8.8)]
            .into_iter()
            .map(|(id, vote)| {
                Record::new(
                    id,
                    [("vote_average".to_string(), FieldValue::Number(vote))],
                    serde_json::Value::Null,
                )
            })
            .collect()
    }

    #[test]
    fn test_all_iterates_in_load_order() {
        let store = MemoryStore::new("movies", sample_records());
        let ids: Vec<_> = store.all().map(|r| r.id()).collect();
        assert_eq!(ids, vec![10, 11, 12]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.source_name(), "movies");
    }

    #[test]
    fn test_all_is_restartable() {
        let store = MemoryStore::new("movies", sample_records());
        let first: Vec<_> = store.all().map(|r| r.id()).collect();
        let second: Vec<_> = store.all().map(|r| r.id()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::new("empty", Vec::new());
        assert!(store.is_empty());
        assert_eq!(store.all().count(), 0);
    }
}
