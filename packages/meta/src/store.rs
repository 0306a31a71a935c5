//! Metadata Store
//!
//! Process-wide mapping from component slug to its extracted override
//! metadata. Populated incrementally by the transform pass (single writer)
//! and read by the query server (many readers); it lives for the duration
//! of one dev session and is reset only on process restart.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Shared handle to the override metadata mapping.
///
/// Clones share the same underlying map. Writes are atomic single-key
/// assignments; the latest write for a slug wins.
#[derive(Debug, Clone, Default)]
pub struct MetaStore {
    inner: Arc<RwLock<HashMap<String, Value>>>,
}

impl MetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `slug`.
    pub fn put(&self, slug: &str, entry: Value) {
        if let Ok(mut map) = self.inner.write() {
            if map.insert(slug.to_string(), entry).is_some() {
                debug!("devtools meta for '{}' overwritten", slug);
            }
        }
    }

    /// Look up one entry by slug.
    pub fn get(&self, slug: &str) -> Option<Value> {
        self.inner.read().ok()?.get(slug).cloned()
    }

    /// Point-in-time copy of the full mapping, for merging.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.inner
            .read()
            .map(|map| map.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
