//! Inline cross-file references into one self-contained document.
//!
//! The walk is structural: every `$ref` string is visited once per
//! occurrence, external targets are resolved through the shared
//! [`Resolver`], inlined under `components/schemas`, and the pointer is
//! rewritten to the local form. A visited table keyed by canonical target
//! makes each external definition inline exactly once, so definitions that
//! reference each other terminate.

mod sources;

pub use sources::{AUTHORING_KEYS, COMPONENT_SECTIONS, merge_sources, strip_authoring_keys};

use crate::{
    REF_KEY,
    load::{self, LoadError},
    resolve::{Reference, ResolveError, Resolver, Scope, definition_ref},
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::{debug, info};

///
/// MergeError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum MergeError {
    #[error("definition name '{name}' is claimed by both '{first}' and '{second}'")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("cannot merge: {reason}")]
    Shape { reason: String },
}

impl From<LoadError> for MergeError {
    fn from(err: LoadError) -> Self {
        Self::Resolve(ResolveError::Load(err))
    }
}

///
/// MergedDocument
///

#[derive(Clone, Debug)]
pub struct MergedDocument {
    /// The merged tree; every `$ref` in it is local.
    pub document: Value,

    /// Canonical path of the root file, when merged from disk.
    pub path: Option<PathBuf>,

    /// Nodes inlined by the merge, keyed by their assigned local name,
    /// in discovery order.
    pub inlined: IndexMap<String, Value>,
}

///
/// Merger
///
/// Reusable across documents; the resolver cache is shared between runs.
///

#[derive(Debug, Default)]
pub struct Merger {
    resolver: Resolver,
}

impl Merger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_resolver(resolver: Resolver) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn into_resolver(self) -> Resolver {
        self.resolver
    }

    /// Load and merge a root file.
    pub fn merge_file(&mut self, path: &Path) -> Result<MergedDocument, MergeError> {
        let canonical = path.canonicalize().map_err(|error| LoadError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let document = load::load_document(&canonical)?;
        let base_dir = canonical
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        self.merge(document, Some(&canonical), &base_dir)
    }

    /// Merge an in-memory document. `file` is its canonical path, if any;
    /// `base_dir` anchors its relative references.
    pub fn merge(
        &mut self,
        mut document: Value,
        file: Option<&Path>,
        base_dir: &Path,
    ) -> Result<MergedDocument, MergeError> {
        if !document.is_object() {
            return Err(MergeError::Shape {
                reason: "document root is not an object".to_string(),
            });
        }

        let snapshot = document.clone();
        let mut walk = Walk::new(&mut self.resolver, &snapshot, file);
        walk.visit(&mut document, None, base_dir)?;
        let inlined = walk.inlined;

        if !inlined.is_empty() {
            let schemas = definition_table(&mut document)?;
            for (name, node) in &inlined {
                schemas.entry(name.clone()).or_insert_with(|| node.clone());
            }
        }

        info!(inlined = inlined.len(), "merged document");

        Ok(MergedDocument {
            document,
            path: file.map(Path::to_path_buf),
            inlined,
        })
    }
}

/// Merge a root file with a fresh resolver.
pub fn merge_file(path: &Path) -> Result<MergedDocument, MergeError> {
    Merger::new().merge_file(path)
}

///
/// Walk
///

struct Walk<'a> {
    resolver: &'a mut Resolver,
    root: &'a Value,
    root_file: Option<&'a Path>,
    authored: HashSet<String>,
    assigned: HashMap<String, String>,
    owners: HashMap<String, String>,
    inlined: IndexMap<String, Value>,
}

impl<'a> Walk<'a> {
    fn new(resolver: &'a mut Resolver, root: &'a Value, root_file: Option<&'a Path>) -> Self {
        let authored = root
            .pointer(crate::DEFINITIONS_POINTER)
            .and_then(Value::as_object)
            .map(|schemas| schemas.keys().cloned().collect())
            .unwrap_or_default();

        Self {
            resolver,
            root,
            root_file,
            authored,
            assigned: HashMap::new(),
            owners: HashMap::new(),
            inlined: IndexMap::new(),
        }
    }

    // visit
    // `file` is the external file `value` came from, `None` for the root
    fn visit(
        &mut self,
        value: &mut Value,
        file: Option<&Path>,
        base_dir: &Path,
    ) -> Result<(), MergeError> {
        match value {
            Value::Object(map) => {
                if let Some(raw) = map.get(REF_KEY).and_then(Value::as_str) {
                    let raw = raw.to_string();
                    if let Some(local) = self.rewrite(&raw, file, base_dir)? {
                        map.insert(REF_KEY.to_string(), Value::String(local));
                    }
                }
                for (key, child) in map.iter_mut() {
                    if key != REF_KEY {
                        self.visit(child, file, base_dir)?;
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.visit(item, file, base_dir)?;
                }
            }
            _ => {}
        }

        Ok(())
    }

    // rewrite
    // returns the local form of `raw`, or None to leave it untouched
    fn rewrite(
        &mut self,
        raw: &str,
        file: Option<&Path>,
        base_dir: &Path,
    ) -> Result<Option<String>, MergeError> {
        let reference = Reference::parse(raw)?;

        let reference = match (reference.is_local(), file) {
            (true, None) => return Ok(None),
            (true, Some(file)) => reference.within(file),
            (false, _) => reference,
        };

        let scope = Scope::new(self.root, self.root_file, base_dir);
        let resolved = self.resolver.resolve(&scope, &reference)?;

        if resolved.is_in_scope() {
            return Ok(Some(format!("#{}", resolved.fragment)));
        }
        if let Some(name) = self.assigned.get(&resolved.canonical) {
            return Ok(Some(definition_ref(name)));
        }

        let name = resolved.name.clone();
        if self.authored.contains(&name) {
            debug!(name = %name, target = %resolved.canonical, "authored definition wins");
            self.assigned.insert(resolved.canonical, name.clone());
            return Ok(Some(definition_ref(&name)));
        }
        if let Some(first) = self.owners.get(&name) {
            return Err(MergeError::NameCollision {
                name,
                first: first.clone(),
                second: resolved.canonical,
            });
        }
        if !resolved.node.is_object() {
            return Err(MergeError::Shape {
                reason: format!("'{raw}' does not point at an object"),
            });
        }

        debug!(name = %name, target = %resolved.canonical, "inlining definition");

        // reserve the slot first so references back to this target stop here
        self.owners.insert(name.clone(), resolved.canonical.clone());
        self.assigned.insert(resolved.canonical.clone(), name.clone());
        self.inlined.insert(name.clone(), Value::Null);

        let mut node = resolved.node;
        self.visit(&mut node, resolved.file.as_deref(), &resolved.base_dir)?;
        self.inlined.insert(name.clone(), node);

        Ok(Some(definition_ref(&name)))
    }
}

// definition_table
// the `components/schemas` object, created when missing
pub(crate) fn definition_table(document: &mut Value) -> Result<&mut Map<String, Value>, MergeError> {
    let root = document.as_object_mut().ok_or_else(|| MergeError::Shape {
        reason: "document root is not an object".to_string(),
    })?;
    let components = root
        .entry("components")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| MergeError::Shape {
            reason: "'components' is not an object".to_string(),
        })?;

    components
        .entry("schemas")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| MergeError::Shape {
            reason: "'components/schemas' is not an object".to_string(),
        })
}
