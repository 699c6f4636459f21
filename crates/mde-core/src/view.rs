//! The derived, filtered view of the record store

use std::sync::Arc;

use ahash::AHashSet;

use crate::record::{Record, RecordId};

/// The ordered sequence of records currently passing all filters
///
/// Derived state: recomputed fresh on every cycle, never authoritative. The
/// sequence preserves store load order; an id set is kept alongside so that
/// selection reconciliation is a lookup, not a scan.
#[derive(Debug, Clone, Default)]
pub struct View {
    records: Vec<Arc<Record>>,
    ids: AHashSet<RecordId>,
}

impl View {
    /// Collect a filtered record sequence into a view
    pub fn from_records(records: impl IntoIterator<Item = Arc<Record>>) -> Self {
        let records: Vec<_> = records.into_iter().collect();
        let ids = records.iter().map(|record| record.id()).collect();
        Self { records, ids }
    }

    /// The visible records in store order
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    /// Iterate the visible records in store order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Record>> {
        self.records.iter()
    }

    /// Whether a record id is visible in this view
    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of visible records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records pass the current filters
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
