//! Page-lifetime dataset metadata cache.

use std::collections::HashMap;
use std::sync::Arc;

use vino_common::{DatasetInfo, VinoId};

/// Cache of fetched [`DatasetInfo`] records, keyed by dataset id.
///
/// Entries are written at most once per id and never evicted; the cache
/// lives as long as the page session. It is owned and injected by whoever
/// constructs the form controller, not shared process-wide.
#[derive(Debug, Default)]
pub struct DatasetInfoCache {
    entries: HashMap<VinoId, Arc<DatasetInfo>>,
}

impl DatasetInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: VinoId) -> Option<Arc<DatasetInfo>> {
        self.entries.get(&id).cloned()
    }

    /// Insert a fetched record, returning the shared handle. An existing
    /// entry is kept as is: info documents are immutable per id.
    pub fn put(&mut self, info: DatasetInfo) -> Arc<DatasetInfo> {
        self.entries
            .entry(info.id)
            .or_insert_with(|| Arc::new(info))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
