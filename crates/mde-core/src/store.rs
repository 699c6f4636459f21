//! Record store collaborator interface

use std::sync::Arc;

use crate::record::Record;

/// Read-only access to the loaded dataset
///
/// Implementations live in collaborator crates (see `mde-data`). The surface
/// is deliberately narrow so that an indexed or query-backed store can
/// replace the in-memory one without touching the engine.
pub trait RecordStore: Send + Sync {
    /// Iterate all records in load order
    ///
    /// The sequence is lazy and restartable: every call starts from the
    /// beginning. Load order is a guarantee views rely on, not incidental.
    fn all(&self) -> Box<dyn Iterator<Item = Arc<Record>> + '_>;

    /// Total number of records
    fn len(&self) -> usize;

    /// Whether the store holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The source name/path this store was loaded from
    fn source_name(&self) -> &str;
}
