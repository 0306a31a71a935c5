//! Transform Hook
//!
//! Entry point invoked once per processed source unit by the build hook.
//! Extraction is a side effect: the caller always passes the original
//! source through unmodified, so nothing is returned on success.

use crate::error::MetaError;
use crate::extract::extract_devtools_block;
use crate::literal;
use crate::slug::slug_from_file_name;
use crate::store::MetaStore;
use serde_json::json;
use tracing::debug;

/// Process one component source unit.
///
/// Units that are not `.vue` files or carry no devtools marker leave the
/// store untouched. A present but malformed override block is an authoring
/// error and fails the unit's build, naming the offending file.
pub fn apply_transform(store: &MetaStore, source: &str, id: &str) -> Result<(), MetaError> {
    if !id.ends_with(".vue") || source.is_empty() {
        return Ok(());
    }

    let file_name = id.rsplit('/').next().unwrap_or(id);
    let slug = slug_from_file_name(file_name);
    if slug.is_empty() {
        return Ok(());
    }

    let Some(block) = extract_devtools_block(source) else {
        return Ok(());
    };

    let meta_object = literal::evaluate(&block).map_err(|source| MetaError::MalformedOverride {
        unit: id.to_string(),
        source,
    })?;

    debug!("extracted devtools meta for '{}' from {}", slug, id);
    store.put(&slug, json!({ "meta": { "devtools": meta_object } }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_marker_leaves_store_untouched() {
        let store = MetaStore::new();
        apply_transform(&store, "<template><div /></template>", "src/Button.vue").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_non_vue_units_are_ignored() {
        let store = MetaStore::new();
        apply_transform(&store, "extendDevtoolsMeta({ a: 1 })", "src/button.ts").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_extracted_block_is_stored_under_envelope() {
        let store = MetaStore::new();
        let source = "<script setup>extendDevtoolsMeta({ example: 'ButtonExample' })</script>";
        apply_transform(&store, source, "src/components/Button.vue").unwrap();
        assert_eq!(
            store.get("button"),
            Some(json!({ "meta": { "devtools": { "example": "ButtonExample" } } }))
        );
    }

    #[test]
    fn test_reprocessing_overwrites_same_slug() {
        let store = MetaStore::new();
        let first = "extendDevtoolsMeta({ rev: 1 })";
        let second = "extendDevtoolsMeta({ rev: 2 })";
        apply_transform(&store, first, "Button.vue").unwrap();
        apply_transform(&store, second, "Button.vue").unwrap();
        assert_eq!(
            store.get("button"),
            Some(json!({ "meta": { "devtools": { "rev": 2 } } }))
        );
    }

    #[test]
    fn test_malformed_block_names_the_unit() {
        let store = MetaStore::new();
        let source = "extendDevtoolsMeta({ example: 'unterminated })";
        let err = apply_transform(&store, source, "src/Badge.vue").unwrap_err();
        assert_eq!(err.unit(), "src/Badge.vue");
        assert!(store.is_empty());
    }
}
