//! Introspection Catalog Input
//!
//! The structurally introspected metadata (props, slots, emits per raw
//! component name) is produced by an external analyzer and owned by it; the
//! server re-reads it on every catalog request so that analyzer updates are
//! visible without a restart. Freshness is deliberately preferred over
//! latency on this low-traffic, dev-only surface; do not add a cache.

use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of the externally maintained introspection catalog.
pub trait IntrospectionSource: Send + Sync {
    /// Load the current catalog. Called once per request.
    fn load(&self) -> anyhow::Result<Value>;
}

/// Reads the catalog from a JSON file on every call.
#[derive(Debug, Clone)]
pub struct FileIntrospectionSource {
    path: PathBuf,
}

impl FileIntrospectionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IntrospectionSource for FileIntrospectionSource {
    fn load(&self) -> anyhow::Result<Value> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading introspection catalog {}", self.path.display()))?;
        let catalog = serde_json::from_str(&content)
            .with_context(|| format!("parsing introspection catalog {}", self.path.display()))?;
        Ok(catalog)
    }
}
