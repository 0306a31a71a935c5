//! Introspection Merger
//!
//! Combines the externally introspected component catalog (props, slots,
//! emits keyed by raw component name) with the override entries collected
//! by the transform pass. Introspected entries are filtered to the
//! library's own components, their default-value encodings are normalized
//! into typed values, keys are renamed to slugs, and overrides are
//! deep-merged on top.

use crate::slug::slug_from_component_name;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// Merge the introspected catalog with the override metadata.
///
/// Returns a mapping from slug to merged entry. Introspected entries whose
/// raw name does not start with `prefix` are dropped; override entries
/// without an introspected counterpart are kept as-is.
pub fn merge_catalog(
    introspected: &Value,
    overrides: &HashMap<String, Value>,
    prefix: &str,
) -> Map<String, Value> {
    let mut catalog = Map::new();

    if let Some(entries) = introspected.as_object() {
        for (name, entry) in entries {
            if !name.starts_with(prefix) {
                continue;
            }
            let slug = slug_from_component_name(name, prefix);
            let mut entry = entry.clone();
            normalize_entry_defaults(&mut entry);

            let merged = match overrides.get(&slug) {
                Some(override_entry) => deep_merge(&entry, override_entry),
                None => entry,
            };
            catalog.insert(slug, merged);
        }
    }

    // Override-only components still appear in the catalog.
    for (slug, entry) in overrides {
        if !catalog.contains_key(slug) {
            catalog.insert(slug.clone(), entry.clone());
        }
    }

    catalog
}

/// Normalize the `default` of every prop descriptor in `entry.meta.props`.
fn normalize_entry_defaults(entry: &mut Value) {
    let Some(props) = entry
        .get_mut("meta")
        .and_then(|meta| meta.get_mut("props"))
        .and_then(Value::as_array_mut)
    else {
        return;
    };

    for prop in props.iter_mut() {
        let Some(prop) = prop.as_object_mut() else {
            continue;
        };
        match resolve_default(prop) {
            Some(default) => {
                prop.insert("default".to_string(), normalize_default(default));
            }
            None => {
                prop.remove("default");
            }
        }
    }
}

/// Resolve the effective default for one prop descriptor: the explicit
/// `default` field when present, else the text of the first `defaultValue`
/// annotation tag that does not point into live configuration.
fn resolve_default(prop: &Map<String, Value>) -> Option<Value> {
    match prop.get("default") {
        Some(Value::Null) | None => {}
        Some(default) => return Some(default.clone()),
    }

    let tags = prop.get("tags")?.as_array()?;
    tags.iter()
        .find(|tag| {
            tag.get("name").and_then(Value::as_str) == Some("defaultValue")
                && !tag
                    .get("text")
                    .and_then(Value::as_str)
                    .is_some_and(|text| text.contains("appConfig"))
        })
        .and_then(|tag| tag.get("text").cloned())
}

/// Normalize one default value encoding into a typed value.
///
/// String values have every quote character stripped, anywhere in the
/// string, not only at the ends; quoted sub-expressions in documentation
/// examples depend on this leniency. The stripped text is then coerced to
/// a boolean or integer where it reads as one. Non-string values pass
/// through, making normalization idempotent.
pub fn normalize_default(value: Value) -> Value {
    let Value::String(text) = value else {
        return value;
    };

    let stripped: String = text.chars().filter(|c| !matches!(c, '"' | '\'' | '`')).collect();

    match stripped.as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(int) = stripped.trim().parse::<i64>() {
        return Value::Number(Number::from(int));
    }

    Value::String(stripped)
}

/// Recursively merge `override_value` onto `base`.
///
/// Maps merge key-by-key with the override winning on conflicts at every
/// depth; any other value, arrays included, is replaced wholesale by the
/// override.
pub fn deep_merge(base: &Value, override_value: &Value) -> Value {
    match (base, override_value) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in override_map {
                let entry = match merged.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        (_, other) => other.clone(),
    }
}
