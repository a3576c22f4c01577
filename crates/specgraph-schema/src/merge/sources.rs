use crate::{
    load,
    merge::{MergeError, Merger, definition_table},
};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Component sections the master document is rebuilt from.
pub const COMPONENT_SECTIONS: [&str; 7] = [
    "schemas",
    "responses",
    "parameters",
    "examples",
    "requestBodies",
    "securitySchemes",
    "headers",
];

/// Extension keys that only drive authoring and never reach the output.
pub const AUTHORING_KEYS: [&str; 7] = [
    "x-controller",
    "x-tags",
    "x-db",
    "x-schema",
    "x-public",
    "x-embeddable",
    "x-model",
];

const MODEL_ONLY_KEY: &str = "x-db";

/// Combine several source documents into the master's skeleton.
///
/// Each source is merged on its own (sharing one resolver). The master keeps
/// its top-level metadata; `paths` and the component sections are rebuilt
/// from the sources in order, later sources overwriting earlier ones.
pub fn merge_sources(master: &Path, sources: &[PathBuf]) -> Result<Value, MergeError> {
    let mut output = load::load_document(master)?;
    let root = output.as_object_mut().ok_or_else(|| MergeError::Shape {
        reason: format!("master '{}' is not an object", master.display()),
    })?;

    let mut paths = Map::new();
    let mut sections: Vec<Map<String, Value>> = vec![Map::new(); COMPONENT_SECTIONS.len()];
    let mut merger = Merger::new();

    for source in sources {
        info!(source = %source.display(), "merging source");
        let merged = merger.merge_file(source)?.document;

        if let Some(src_paths) = merged.get("paths").and_then(Value::as_object) {
            absorb(&mut paths, src_paths, "paths", source);
        }
        for (section, table) in COMPONENT_SECTIONS.iter().zip(sections.iter_mut()) {
            if let Some(src) = merged
                .get("components")
                .and_then(|c| c.get(*section))
                .and_then(Value::as_object)
            {
                absorb(table, src, section, source);
            }
        }
    }

    let mut components = Map::new();
    for (section, table) in COMPONENT_SECTIONS.iter().zip(sections) {
        components.insert((*section).to_string(), Value::Object(table));
    }
    root.insert("paths".to_string(), Value::Object(paths));
    root.insert("components".to_string(), Value::Object(components));

    remove_model_only_properties(&mut output)?;
    strip_authoring_keys(&mut output);

    Ok(output)
}

/// Remove every authoring-only extension key at any depth.
pub fn strip_authoring_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in AUTHORING_KEYS {
                map.shift_remove(key);
            }
            for child in map.values_mut() {
                strip_authoring_keys(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_authoring_keys),
        _ => {}
    }
}

// absorb
fn absorb(into: &mut Map<String, Value>, from: &Map<String, Value>, section: &str, source: &Path) {
    for (name, value) in from {
        if into.insert(name.clone(), value.clone()).is_some() {
            warn!(section, name = %name, source = %source.display(), "overwriting earlier entry");
        }
    }
}

// remove_model_only_properties
// drops properties flagged `x-db: { model_only: true }` from every schema
fn remove_model_only_properties(document: &mut Value) -> Result<(), MergeError> {
    for schema in definition_table(document)?.values_mut() {
        let Some(properties) = schema.get_mut("properties").and_then(Value::as_object_mut) else {
            continue;
        };

        properties.retain(|_, prop| {
            !prop
                .get(MODEL_ONLY_KEY)
                .and_then(|db| db.get("model_only"))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        });
    }

    Ok(())
}
