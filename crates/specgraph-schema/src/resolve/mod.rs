//! Reference resolution.
//!
//! A [`Resolver`] follows `$ref` strings within the document in scope and
//! across files. Every relative path is resolved against the directory of the
//! file that contains the reference, and that directory is handed back in
//! [`Resolved::base_dir`] so nested references keep resolving correctly.

mod reference;

pub use reference::{Fragment, Reference, definition_name, definition_ref};

use crate::{REF_KEY, load::{self, LoadError}};
use serde_json::Value;
use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// ResolveError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ResolveError {
    #[error("broken reference '{reference}': {reason}")]
    BrokenReference { reference: String, reason: String },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("malformed reference '{reference}': {reason}")]
    MalformedReference { reference: String, reason: String },

    #[error("reference cycle: {chain}")]
    ReferenceCycle { chain: String },
}

impl ResolveError {
    fn broken(reference: &Reference, reason: impl Into<String>) -> Self {
        Self::BrokenReference {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }
}

///
/// Scope
///
/// The document a reference is read from. `file` is the canonical path of
/// that document when it came from disk.
///

#[derive(Clone, Copy, Debug)]
pub struct Scope<'a> {
    pub document: &'a Value,
    pub file: Option<&'a Path>,
    pub base_dir: &'a Path,
}

impl<'a> Scope<'a> {
    #[must_use]
    pub const fn new(document: &'a Value, file: Option<&'a Path>, base_dir: &'a Path) -> Self {
        Self {
            document,
            file,
            base_dir,
        }
    }
}

///
/// Resolved
///

#[derive(Clone, Debug)]
pub struct Resolved {
    /// The target node, with aliases already followed.
    pub node: Value,

    /// Canonical name: the node's `title`, else the last fragment segment,
    /// else the file stem.
    pub name: String,

    /// Directory that relative references inside `node` resolve against.
    pub base_dir: PathBuf,

    /// Canonical file the node lives in; `None` for the document in scope.
    pub file: Option<PathBuf>,

    /// Fragment of the final target within its file.
    pub fragment: Fragment,

    /// Unique key of the target, `file#fragment`.
    pub canonical: String,
}

impl Resolved {
    /// True when the target lives in the document in scope.
    #[must_use]
    pub const fn is_in_scope(&self) -> bool {
        self.file.is_none()
    }
}

///
/// Resolver
///
/// Owns the per-run cache of parsed files keyed by canonical path.
///

#[derive(Debug, Default)]
pub struct Resolver {
    cache: HashMap<PathBuf, Arc<Value>>,
}

impl Resolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct files loaded so far.
    #[must_use]
    pub fn cached_files(&self) -> usize {
        self.cache.len()
    }

    /// Load a file through the cache. `path` must already be canonical.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Value>, ResolveError> {
        if let Some(doc) = self.cache.get(path) {
            return Ok(Arc::clone(doc));
        }

        debug!(path = %path.display(), "loading referenced document");
        let doc = Arc::new(load::load_document(path)?);
        self.cache.insert(path.to_path_buf(), Arc::clone(&doc));

        Ok(doc)
    }

    /// Parse and resolve a raw `$ref` string.
    pub fn resolve_str(&mut self, scope: &Scope<'_>, raw: &str) -> Result<Resolved, ResolveError> {
        let reference = Reference::parse(raw)?;

        self.resolve(scope, &reference)
    }

    /// Resolve a reference, following alias chains until a concrete node.
    pub fn resolve(
        &mut self,
        scope: &Scope<'_>,
        reference: &Reference,
    ) -> Result<Resolved, ResolveError> {
        let mut chain: Vec<String> = Vec::new();
        let mut current = reference.clone();
        let mut file = scope.file.map(Path::to_path_buf);
        let mut base_dir = scope.base_dir.to_path_buf();

        loop {
            let resolved = self.step(scope, file.as_deref(), &base_dir, &current)?;

            if chain.contains(&resolved.canonical) {
                chain.push(resolved.canonical);
                return Err(ResolveError::ReferenceCycle {
                    chain: chain.join(" -> "),
                });
            }
            chain.push(resolved.canonical.clone());

            let Some(next) = alias_target(&resolved.node) else {
                return Ok(resolved);
            };

            debug!(from = %resolved.canonical, to = next, "following alias");
            current = Reference::parse(next)?;
            base_dir.clone_from(&resolved.base_dir);
            file = resolved.file.or_else(|| scope.file.map(Path::to_path_buf));
        }
    }

    // step
    // resolves one hop; `file` is the document `reference` was written in
    fn step(
        &mut self,
        scope: &Scope<'_>,
        file: Option<&Path>,
        base_dir: &Path,
        reference: &Reference,
    ) -> Result<Resolved, ResolveError> {
        let (target_file, fragment) = match reference {
            Reference::Local(fragment) => (file.map(Path::to_path_buf), fragment),
            Reference::External { path, fragment } => {
                (Some(canonical_path(base_dir, path, reference)?), fragment)
            }
        };

        // the document in scope is read in memory, never from disk
        let in_scope = match (&target_file, scope.file) {
            (None, _) => true,
            (Some(target), Some(scope_file)) => target == scope_file,
            (Some(_), None) => false,
        };

        let node = if in_scope {
            lookup(scope.document, fragment).cloned()
        } else {
            let path = target_file.as_deref().unwrap_or(base_dir);
            let doc = self.load(path)?;
            lookup(&doc, fragment).cloned()
        };
        let node = node.ok_or_else(|| ResolveError::broken(reference, "target not found"))?;

        let (file, base_dir) = if in_scope {
            (None, scope.base_dir.to_path_buf())
        } else {
            let dir = target_file
                .as_deref()
                .and_then(Path::parent)
                .map_or_else(|| base_dir.to_path_buf(), Path::to_path_buf);
            (target_file, dir)
        };

        let key_file = file
            .as_deref()
            .or(scope.file)
            .map(|f| f.display().to_string())
            .unwrap_or_default();
        let canonical = format!("{key_file}#{fragment}");
        let name = canonical_name(&node, fragment, file.as_deref().or(scope.file));

        Ok(Resolved {
            node,
            name,
            base_dir,
            file,
            fragment: fragment.clone(),
            canonical,
        })
    }
}

/// The `$ref` string of a node that is itself a reference.
#[must_use]
pub fn alias_target(node: &Value) -> Option<&str> {
    node.get(REF_KEY).and_then(Value::as_str)
}

/// Read the node a fragment names within a document.
#[must_use]
pub fn lookup<'a>(document: &'a Value, fragment: &Fragment) -> Option<&'a Value> {
    match fragment {
        Fragment::Document => Some(document),
        Fragment::Name(name) => document.get(name),
        Fragment::Pointer(pointer) => document.pointer(pointer),
    }
}

// canonical_path
fn canonical_path(
    base_dir: &Path,
    path: &Path,
    reference: &Reference,
) -> Result<PathBuf, ResolveError> {
    let joined = base_dir.join(path);

    joined.canonicalize().map_err(|error| {
        if error.kind() == io::ErrorKind::NotFound {
            ResolveError::broken(reference, format!("file '{}' not found", joined.display()))
        } else {
            ResolveError::Load(LoadError::Io {
                path: joined.clone(),
                error,
            })
        }
    })
}

// canonical_name
fn canonical_name(node: &Value, fragment: &Fragment, file: Option<&Path>) -> String {
    node.get("title")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .or_else(|| fragment.last_segment())
        .or_else(|| {
            file.and_then(Path::file_stem)
                .and_then(|stem| stem.to_str())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| "document".to_string())
}
