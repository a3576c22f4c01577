//! The compiled model graph and its JSON hand-off.

use crate::{
    endpoint::Endpoint,
    model::{Entity, JoinTable, Relationship},
    namespace::Namespace,
    options::BuildOptions,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use specgraph_schema::node::Server;
use std::collections::BTreeMap;

///
/// ModelGraph
///
/// Built once per compile and handed off read-only.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModelGraph {
    pub entities: IndexMap<String, Entity>,

    /// Flat listing of every entity relationship, in entity order.
    pub relationships: Vec<RelationshipEntry>,

    pub join_tables: IndexMap<String, JoinTable>,
    pub endpoints: IndexMap<String, Endpoint>,
    pub namespaces: BTreeMap<String, Namespace>,

    /// Top-level servers, as declared.
    #[serde(default)]
    pub servers: Vec<Server>,

    #[serde(default)]
    pub microservices: Vec<String>,

    pub options: BuildOptions,
}

///
/// RelationshipEntry
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RelationshipEntry {
    pub source: String,
    pub name: String,

    #[serde(flatten)]
    pub relationship: Relationship,
}

///
/// ForeignKey
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ForeignKey<'a> {
    /// Entity or join table carrying the column.
    pub owner: &'a str,
    pub column: &'a str,

    /// `namespace.table.primaryKey` of the referenced entity.
    pub target: &'a str,
}

impl ModelGraph {
    #[must_use]
    pub fn new(
        entities: IndexMap<String, Entity>,
        join_tables: IndexMap<String, JoinTable>,
        endpoints: IndexMap<String, Endpoint>,
        namespaces: BTreeMap<String, Namespace>,
        servers: Vec<Server>,
        microservices: Vec<String>,
        options: BuildOptions,
    ) -> Self {
        let relationships = entities
            .values()
            .flat_map(|entity| {
                entity
                    .relationships
                    .iter()
                    .map(|(name, relationship)| RelationshipEntry {
                        source: entity.name.clone(),
                        name: name.clone(),
                        relationship: relationship.clone(),
                    })
            })
            .collect();

        Self {
            entities,
            relationships,
            join_tables,
            endpoints,
            namespaces,
            servers,
            microservices,
            options,
        }
    }

    /// Every bound key column across entities and join tables.
    pub fn foreign_keys(&self) -> impl Iterator<Item = ForeignKey<'_>> {
        let entity_keys = self.entities.iter().flat_map(|(owner, entity)| {
            entity.foreign_keys().map(move |(column, target)| ForeignKey {
                owner,
                column,
                target,
            })
        });
        let join_keys = self.join_tables.iter().flat_map(|(owner, table)| {
            table.columns.iter().filter_map(move |(column, col)| {
                col.foreign_key.as_deref().map(|target| ForeignKey {
                    owner,
                    column,
                    target,
                })
            })
        });

        entity_keys.chain(join_keys)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use crate::{graph::ModelGraph, test_fixtures::build_schemas};
    use serde_json::json;

    #[test]
    fn json_hand_off_round_trips() {
        let graph = build_schemas(json!({
            "Post": { "type": "object", "properties": {
                "title": { "type": "string" },
                "tags": { "type": "array", "items": { "$ref": "#/components/schemas/Tag" } }
            }},
            "Tag": { "type": "object", "properties": {
                "posts": { "type": "array", "items": { "$ref": "#/components/schemas/Post" } }
            }}
        }))
        .unwrap();

        let text = graph.to_json().unwrap();
        let back = ModelGraph::from_json(&text).unwrap();

        assert_eq!(back, graph);
        assert!(text.contains("\"MANY_TO_MANY\""));
    }

    #[test]
    fn relationship_listing_is_flattened() {
        let graph = build_schemas(json!({
            "Cart": { "type": "object", "properties": {
                "items": { "type": "array", "items": { "$ref": "#/components/schemas/Item" } }
            }},
            "Item": { "type": "object", "properties": { "name": { "type": "string" } } }
        }))
        .unwrap();

        let value = graph.to_json_value().unwrap();
        let entry = &value["relationships"][0];

        assert_eq!(entry["source"], "Cart");
        assert_eq!(entry["name"], "items");
        assert_eq!(entry["target"], "Item");
        assert_eq!(entry["cardinality"], "TO_MANY");
        assert_eq!(entry["uses_list"], true);
    }

    #[test]
    fn foreign_keys_span_entities_and_join_tables() {
        let graph = build_schemas(json!({
            "Post": { "type": "object", "properties": {
                "tags": { "type": "array", "items": { "$ref": "#/components/schemas/Tag" } },
                "author": { "$ref": "#/components/schemas/Author" }
            }},
            "Tag": { "type": "object", "properties": {
                "posts": { "type": "array", "items": { "$ref": "#/components/schemas/Post" } }
            }},
            "Author": { "type": "object", "properties": { "name": { "type": "string" } } }
        }))
        .unwrap();

        let keys: Vec<_> = graph
            .foreign_keys()
            .map(|k| (k.owner, k.column, k.target))
            .collect();

        assert_eq!(
            keys,
            [
                ("Post", "author_id", "default.authors.identifier"),
                ("posttag", "post_id", "default.posts.identifier"),
                ("posttag", "tag_id", "default.tags.identifier"),
            ]
        );
    }
}
