//! Merger tests: filtering, default normalization, renaming and override
//! precedence over a realistic introspected catalog.

use serde_json::{json, Value};
use std::collections::HashMap;
use ui_devtools_meta::{merge_catalog, MetaStore};

fn introspected_fixture() -> Value {
    json!({
        "UButton": {
            "meta": {
                "props": [
                    {
                        "name": "size",
                        "default": "'md'",
                        "type": "string"
                    },
                    {
                        "name": "variant",
                        "tags": [
                            { "name": "defaultValue", "text": "'solid'" }
                        ]
                    },
                    {
                        "name": "color",
                        "tags": [
                            { "name": "defaultValue", "text": "appConfig.ui.colors.primary" }
                        ]
                    },
                    {
                        "name": "block",
                        "default": "false"
                    },
                    {
                        "name": "tabindex",
                        "default": "\"0\""
                    }
                ],
                "slots": [{ "name": "default" }],
                "emits": ["click"]
            }
        },
        "UInputMenu": {
            "meta": { "props": [], "slots": [], "emits": [] }
        },
        "NInput": {
            "meta": { "props": [], "slots": [], "emits": [] }
        }
    })
}

#[test]
fn test_wrong_prefix_components_are_dropped() {
    let catalog = merge_catalog(&introspected_fixture(), &HashMap::new(), "U");
    assert!(catalog.contains_key("button"));
    assert!(catalog.contains_key("input-menu"));
    assert!(!catalog.contains_key("input"));
    assert!(!catalog.contains_key("n-input"));
}

#[test]
fn test_defaults_are_normalized() {
    let catalog = merge_catalog(&introspected_fixture(), &HashMap::new(), "U");
    let props = catalog["button"]["meta"]["props"].as_array().unwrap();

    let default_of = |name: &str| -> Option<&Value> {
        props
            .iter()
            .find(|p| p["name"] == name)
            .and_then(|p| p.get("default"))
    };

    assert_eq!(default_of("size"), Some(&json!("md")));
    assert_eq!(default_of("variant"), Some(&json!("solid")));
    // The appConfig-referencing tag is not frozen into the catalog.
    assert_eq!(default_of("color"), None);
    assert_eq!(default_of("block"), Some(&json!(false)));
    assert_eq!(default_of("tabindex"), Some(&json!(0)));
}

#[test]
fn test_sibling_fields_survive_normalization() {
    let catalog = merge_catalog(&introspected_fixture(), &HashMap::new(), "U");
    let props = catalog["button"]["meta"]["props"].as_array().unwrap();
    let size = props.iter().find(|p| p["name"] == "size").unwrap();
    assert_eq!(size["type"], json!("string"));
    assert_eq!(catalog["button"]["meta"]["slots"], json!([{ "name": "default" }]));
    assert_eq!(catalog["button"]["meta"]["emits"], json!(["click"]));
}

#[test]
fn test_override_wins_on_conflict() {
    let introspected = json!({
        "UButton": {
            "meta": { "props": [{ "name": "size", "default": "'md'" }] }
        }
    });
    let mut overrides = HashMap::new();
    overrides.insert(
        "button".to_string(),
        json!({ "meta": { "props": [{ "name": "size", "default": "lg" }] } }),
    );

    let catalog = merge_catalog(&introspected, &overrides, "U");
    assert_eq!(
        catalog["button"]["meta"]["props"],
        json!([{ "name": "size", "default": "lg" }])
    );
}

#[test]
fn test_merge_is_a_deep_union() {
    let introspected = json!({
        "UBadge": { "meta": { "props": [], "slots": [], "emits": [] } }
    });
    let mut overrides = HashMap::new();
    overrides.insert(
        "badge".to_string(),
        json!({ "meta": { "devtools": { "example": "BadgeExample" } } }),
    );

    let catalog = merge_catalog(&introspected, &overrides, "U");
    assert_eq!(catalog["badge"]["meta"]["devtools"]["example"], json!("BadgeExample"));
    assert_eq!(catalog["badge"]["meta"]["props"], json!([]));
}

#[test]
fn test_override_only_components_are_included() {
    let mut overrides = HashMap::new();
    overrides.insert(
        "toast".to_string(),
        json!({ "meta": { "devtools": { "example": "ToastExample" } } }),
    );
    let catalog = merge_catalog(&json!({}), &overrides, "U");
    assert_eq!(
        catalog["toast"],
        json!({ "meta": { "devtools": { "example": "ToastExample" } } })
    );
}

#[test]
fn test_end_to_end_with_empty_store() {
    let introspected = json!({
        "UBadge": {
            "meta": {
                "props": [{ "name": "rounded", "default": "'true'" }],
                "slots": [],
                "emits": []
            }
        }
    });
    let store = MetaStore::new();
    let catalog = merge_catalog(&introspected, &store.snapshot(), "U");

    assert_eq!(catalog.len(), 1);
    assert_eq!(
        catalog["badge"]["meta"]["props"],
        json!([{ "name": "rounded", "default": true }])
    );
}

#[test]
fn test_custom_prefix_convention() {
    let introspected = json!({
        "XButton": { "meta": { "props": [], "slots": [], "emits": [] } },
        "UButton": { "meta": { "props": [], "slots": [], "emits": [] } }
    });
    let catalog = merge_catalog(&introspected, &HashMap::new(), "X");
    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains_key("button"));
}
