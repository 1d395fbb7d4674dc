//! In-memory change log

use crate::api::ChangeLogStore;
use crate::error::StoreResult;
use async_trait::async_trait;
use eam_model::{ChangeLog, EntityReference};
use parking_lot::Mutex;

/// Append-only change log held in a vector
#[derive(Debug, Default)]
pub struct InMemoryChangeLog {
    entries: Mutex<Vec<ChangeLog>>,
}

impl InMemoryChangeLog {
    /// Create empty log
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry
    #[must_use]
    pub fn entries(&self) -> Vec<ChangeLog> {
        self.entries.lock().clone()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl ChangeLogStore for InMemoryChangeLog {
    async fn write(&self, entry: ChangeLog) -> StoreResult<()> {
        self.entries.lock().push(entry);
        Ok(())
    }

    async fn find_by_parent(&self, parent: &EntityReference) -> StoreResult<Vec<ChangeLog>> {
        Ok(self
            .entries
            .lock()
            .iter()
            .filter(|e| e.parent_reference == *parent)
            .cloned()
            .collect())
    }
}
