//! specgraph compiles a (possibly multi-file) OpenAPI 3 document into a
//! relational model graph: entities, columns, foreign keys and relationship
//! cardinality, plus per-path endpoint descriptors.
//!
//! ```text
//! merge -> pass 1..4 -> bind keys -> endpoints -> namespaces
//! ```

pub mod error;

// crates
pub use specgraph_config_build as config;
pub use specgraph_core as core;
pub use specgraph_schema as schema;
pub use specgraph_utils as utils;

pub use error::{Error, ErrorKind, ErrorOrigin};

use serde_json::Value;
use specgraph_core::{graph::ModelGraph, options::BuildOptions};
use specgraph_schema::{
    merge::{self, MergedDocument},
    node::Document,
};
use std::path::{Path, PathBuf};
use tracing::info;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{Error, ErrorKind, compile};
    pub use specgraph_core::prelude::*;
    pub use specgraph_schema::node::Document;
}

/// Merge the document at `path` and compile it.
pub fn compile(path: &Path, options: &BuildOptions) -> Result<ModelGraph, Error> {
    info!(input = %path.display(), "compiling");
    let merged = merge_file(path)?;

    compile_document(&Document::from(merged), options)
}

/// Compile an already merged document.
pub fn compile_document(document: &Document, options: &BuildOptions) -> Result<ModelGraph, Error> {
    Ok(specgraph_core::build(document, options)?)
}

/// Resolve the options for an input: an explicit config file, else
/// `specgraph.toml` next to the input, else the defaults.
pub fn options_for(input: &Path, config: Option<&Path>) -> Result<BuildOptions, Error> {
    let options = match config {
        Some(path) => specgraph_config_build::load_config(path)?,
        None => {
            let dir = input.parent().unwrap_or_else(|| Path::new("."));
            specgraph_config_build::discover(dir)?
        }
    };

    Ok(options)
}

/// Inline every cross-file reference of the document at `path`.
pub fn merge_file(path: &Path) -> Result<MergedDocument, Error> {
    Ok(merge::merge_file(path)?)
}

/// Rebuild `master` from several source documents.
pub fn merge_sources(master: &Path, sources: &[PathBuf]) -> Result<Value, Error> {
    Ok(merge::merge_sources(master, sources)?)
}

/// Write a document as JSON or YAML by extension.
pub fn write_document(path: &Path, value: &Value) -> Result<(), Error> {
    Ok(specgraph_schema::load::write_document(path, value)?)
}

/// Write a model graph as pretty JSON.
pub fn write_graph(path: &Path, graph: &ModelGraph) -> Result<(), Error> {
    let value = graph
        .to_json_value()
        .map_err(|e| Error::new(ErrorKind::Internal, ErrorOrigin::Interface, e.to_string()))?;

    write_document(path, &value)
}
