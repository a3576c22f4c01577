use crate::{
    model::{Column, Relationship},
    options::BuildOptions,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use specgraph_schema::node::SchemaObject;
use specgraph_utils::{flat, pluralize};

///
/// Entity
///
/// One named definition compiled to a table. The namespace is fixed at
/// creation; columns and relationships only grow, apart from a relationship
/// replacing a column of the same name.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Entity {
    /// Definition key, unique across the document.
    pub name: String,

    /// `title` of the definition, else its key.
    pub resource: String,

    pub namespace: String,
    pub table_name: String,
    pub primary_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub columns: IndexMap<String, Column>,
    pub relationships: IndexMap<String, Relationship>,
}

impl Entity {
    /// Create an empty entity for a definition.
    #[must_use]
    pub fn from_definition(name: &str, schema: &SchemaObject, options: &BuildOptions) -> Self {
        let resource = schema.title.clone().unwrap_or_else(|| name.to_string());
        let namespace = schema
            .namespace
            .clone()
            .unwrap_or_else(|| options.default_namespace.clone());
        let table_name = schema
            .table_name
            .clone()
            .or_else(|| schema.plural.as_deref().map(flat))
            .or_else(|| options.table_names.get(&resource).cloned())
            .unwrap_or_else(|| pluralize(&resource));

        Self {
            name: name.to_string(),
            resource,
            namespace,
            table_name,
            primary_key: options.primary_key.clone(),
            description: schema.description.clone(),
            columns: IndexMap::new(),
            relationships: IndexMap::new(),
        }
    }

    /// Lower-case name used in generated column and relationship names.
    #[must_use]
    pub fn label(&self) -> String {
        flat(&self.name)
    }

    /// Column name of a key pointing at this entity.
    #[must_use]
    pub fn key_column(&self) -> String {
        format!("{}_id", self.label())
    }

    /// What a key column pointing at this entity references.
    #[must_use]
    pub fn foreign_key_target(&self) -> String {
        format!("{}.{}.{}", self.namespace, self.table_name, self.primary_key)
    }

    /// Insert or replace a column.
    pub fn add_column(&mut self, name: impl Into<String>, column: Column) {
        self.columns.insert(name.into(), column);
    }

    /// Insert a relationship; a column of the same name is dropped.
    pub fn add_relationship(&mut self, name: impl Into<String>, relationship: Relationship) {
        let name = name.into();
        self.columns.shift_remove(&name);
        self.relationships.insert(name, relationship);
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().filter_map(|(name, col)| {
            col.foreign_key
                .as_deref()
                .map(|target| (name.as_str(), target))
        })
    }
}
