use crate::{build, error::BuildError, graph::ModelGraph, options::BuildOptions};
use serde_json::{Value, json};
use specgraph_schema::node::Document;

/// Wrap a tree as an in-memory document.
pub fn document(value: Value) -> Document {
    Document::new(value, None)
}

/// A 3.0 document with the given definition table and no paths.
pub fn with_schemas(schemas: Value) -> Document {
    document(json!({
        "openapi": "3.0.0",
        "info": { "title": "fixture", "version": "1" },
        "components": { "schemas": schemas }
    }))
}

/// Build a definition table with default options.
pub fn build_schemas(schemas: Value) -> Result<ModelGraph, BuildError> {
    build(&with_schemas(schemas), &BuildOptions::default())
}
