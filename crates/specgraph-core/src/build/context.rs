use crate::{
    error::BuildError,
    model::{Entity, JoinTable},
    options::BuildOptions,
};
use indexmap::IndexMap;
use serde::Deserialize;
use specgraph_schema::{
    node::{Document, NodeError, SchemaObject},
    resolve::{Resolver, Scope, definition_name},
};
use std::path::{Path, PathBuf};

///
/// KeyOwner
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum KeyOwner {
    Entity(String),
    JoinTable(String),
}

///
/// PendingKey
///
/// A foreign key found during the passes, bound once every entity exists.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PendingKey {
    pub owner: KeyOwner,
    pub column: String,

    /// Entity name the key points at.
    pub target: String,
}

///
/// BuildContext
///
/// State shared by every pass of one build. Definitions are borrowed for
/// the whole build so passes can read them while mutating entities.
///

pub struct BuildContext<'a> {
    pub options: &'a BuildOptions,
    pub document: &'a Document,
    pub definitions: &'a IndexMap<String, SchemaObject>,
    pub entities: IndexMap<String, Entity>,
    pub join_tables: IndexMap<String, JoinTable>,
    pub pending: Vec<PendingKey>,
    resolver: Resolver,
    base_dir: PathBuf,
}

impl<'a> BuildContext<'a> {
    #[must_use]
    pub fn new(
        document: &'a Document,
        definitions: &'a IndexMap<String, SchemaObject>,
        options: &'a BuildOptions,
    ) -> Self {
        let base_dir = document
            .path()
            .and_then(Path::parent)
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        Self {
            options,
            document,
            definitions,
            entities: IndexMap::new(),
            join_tables: IndexMap::new(),
            pending: Vec::new(),
            resolver: Resolver::new(),
            base_dir,
        }
    }

    /// Look up the definition a local `$ref` names.
    pub fn definition(
        &self,
        owner: &str,
        reference: &str,
    ) -> Result<(&'a str, &'a SchemaObject), BuildError> {
        definition_name(reference)
            .and_then(|name| self.definitions.get_key_value(&name))
            .map(|(name, schema)| (name.as_str(), schema))
            .ok_or_else(|| BuildError::broken(owner, reference))
    }

    pub fn entity(&self, name: &str) -> Result<&Entity, BuildError> {
        self.entities
            .get(name)
            .ok_or_else(|| BuildError::broken(name, name))
    }

    pub fn entity_mut(&mut self, name: &str) -> Result<&mut Entity, BuildError> {
        self.entities
            .get_mut(name)
            .ok_or_else(|| BuildError::broken(name, name))
    }

    /// Resolve any `$ref` against the document and read it as a schema.
    pub fn resolve_schema(
        &mut self,
        reference: &str,
    ) -> Result<(String, SchemaObject), BuildError> {
        let scope = Scope::new(&self.document.value, self.document.path(), &self.base_dir);
        let resolved = self.resolver.resolve_str(&scope, reference)?;
        let schema = SchemaObject::deserialize(&resolved.node).map_err(|error| {
            NodeError::Definition {
                name: resolved.name.clone(),
                error,
            }
        })?;

        Ok((resolved.name, schema))
    }

    /// Record a key to bind later; repeats are dropped.
    pub fn defer_key(&mut self, owner: KeyOwner, column: impl Into<String>, target: &str) {
        let key = PendingKey {
            owner,
            column: column.into(),
            target: target.to_string(),
        };

        if !self.pending.contains(&key) {
            self.pending.push(key);
        }
    }

    #[must_use]
    pub fn finish(self) -> (IndexMap<String, Entity>, IndexMap<String, JoinTable>) {
        (self.entities, self.join_tables)
    }
}
