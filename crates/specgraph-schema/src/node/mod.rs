//! Typed views over a merged document.

mod path;
mod schema;
mod server;

pub use path::{
    Content, JSON_MEDIA_TYPE, MediaType, Operation, Parameter, PathItem, RequestBody, Response,
};
pub use schema::SchemaObject;
pub use server::{Microservice, Server, microservice_name};

use crate::{DEFINITIONS_POINTER, merge::MergedDocument, types::HttpMethod};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

///
/// NodeError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum NodeError {
    #[error("definition '{name}' is malformed: {error}")]
    Definition {
        name: String,
        error: serde_json::Error,
    },

    #[error("operation '{method}' on '{path}' is malformed: {error}")]
    Operation {
        path: String,
        method: HttpMethod,
        error: serde_json::Error,
    },

    #[error("path item '{path}' is malformed: {error}")]
    PathItem {
        path: String,
        error: serde_json::Error,
    },

    #[error("servers are malformed: {error}")]
    Servers { error: serde_json::Error },

    #[error("'{key}' is not an object")]
    Table { key: String },
}

///
/// Document
///
/// A merged document tree and the file it came from.
///

#[derive(Clone, Debug)]
pub struct Document {
    pub path: Option<PathBuf>,
    pub value: Value,
}

impl Document {
    #[must_use]
    pub const fn new(value: Value, path: Option<PathBuf>) -> Self {
        Self { path, value }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The top-level `openapi` version string.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.value.get("openapi").and_then(Value::as_str)
    }

    /// Raw definition table, in document order.
    pub fn definition_table(&self) -> Result<Option<&serde_json::Map<String, Value>>, NodeError> {
        match self.value.pointer(DEFINITIONS_POINTER) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(NodeError::Table {
                key: "components/schemas".to_string(),
            }),
        }
    }

    /// Every named definition, typed, in document order.
    pub fn definitions(&self) -> Result<IndexMap<String, SchemaObject>, NodeError> {
        let Some(table) = self.definition_table()? else {
            return Ok(IndexMap::new());
        };

        table
            .iter()
            .map(|(name, value)| {
                SchemaObject::deserialize(value)
                    .map(|schema| (name.clone(), schema))
                    .map_err(|error| NodeError::Definition {
                        name: name.clone(),
                        error,
                    })
            })
            .collect()
    }

    /// The top-level server list; empty when the document declares none.
    pub fn servers(&self) -> Result<Vec<Server>, NodeError> {
        match self.value.get("servers") {
            None => Ok(Vec::new()),
            Some(value) => {
                Vec::<Server>::deserialize(value).map_err(|error| NodeError::Servers { error })
            }
        }
    }

    /// Every path item, typed, in document order.
    pub fn paths(&self) -> Result<IndexMap<String, PathItem>, NodeError> {
        let table = match self.value.get("paths") {
            None => return Ok(IndexMap::new()),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(NodeError::Table {
                    key: "paths".to_string(),
                });
            }
        };

        table
            .iter()
            .map(|(path, value)| {
                PathItem::deserialize(value)
                    .map(|item| (path.clone(), item))
                    .map_err(|error| NodeError::PathItem {
                        path: path.clone(),
                        error,
                    })
            })
            .collect()
    }
}

impl From<MergedDocument> for Document {
    fn from(merged: MergedDocument) -> Self {
        Self::new(merged.document, merged.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn definitions_keep_document_order() {
        let doc = Document::new(
            json!({ "components": { "schemas": {
                "Zebra": { "type": "object", "properties": { "a": { "type": "string" } } },
                "Apple": { "type": "object", "properties": { "b": { "type": "string" } } }
            }}}),
            None,
        );

        let names: Vec<_> = doc.definitions().unwrap().into_keys().collect();
        assert_eq!(names, ["Zebra", "Apple"]);
    }

    #[test]
    fn missing_tables_are_empty() {
        let doc = Document::new(json!({ "openapi": "3.0.1" }), None);

        assert!(doc.definitions().unwrap().is_empty());
        assert!(doc.paths().unwrap().is_empty());
        assert!(doc.servers().unwrap().is_empty());
        assert_eq!(doc.version(), Some("3.0.1"));
    }

    #[test]
    fn malformed_definition_names_the_definition() {
        let doc = Document::new(
            json!({ "components": { "schemas": { "Bad": { "required": "yes" } } } }),
            None,
        );

        let err = doc.definitions().unwrap_err();
        assert!(matches!(err, NodeError::Definition { ref name, .. } if name == "Bad"));
    }

    #[test]
    fn non_object_table_is_rejected() {
        let doc = Document::new(json!({ "paths": [] }), None);

        assert!(matches!(doc.paths(), Err(NodeError::Table { .. })));
    }

    #[test]
    fn servers_need_a_url() {
        let doc = Document::new(
            json!({ "servers": [{ "url": "http://localhost:5000/api" }] }),
            None,
        );
        assert_eq!(doc.servers().unwrap()[0].url, "http://localhost:5000/api");

        let doc = Document::new(json!({ "servers": [{ "description": "nowhere" }] }), None);
        assert!(matches!(doc.servers(), Err(NodeError::Servers { .. })));

        let doc = Document::new(json!({ "servers": "http://localhost" }), None);
        assert!(matches!(doc.servers(), Err(NodeError::Servers { .. })));
    }
}
