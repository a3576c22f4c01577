//! Multi-pass model construction.
//!
//! 1. `scalar`: entities and primitive columns, plus shape checks
//! 2. `compose`: `allOf` members
//! 3. `choice`: `oneOf` alternatives
//! 4. `relation`: reference properties and array definitions
//!
//! Every pass visits all definitions in document order. Keys found in
//! passes 3 and 4 are deferred and bound by `bind` once every entity exists.

mod bind;
mod choice;
mod compose;
mod context;
mod link;
mod relation;
mod scalar;

#[cfg(test)]
mod tests;

pub use context::{BuildContext, KeyOwner, PendingKey};

use crate::{
    endpoint, error::BuildError, graph::ModelGraph, namespace, options::BuildOptions,
};
use specgraph_schema::node::Document;
use tracing::info;

/// Major version prefix of the `openapi` field this compiler accepts.
pub const SUPPORTED_VERSION_PREFIX: &str = "3";

/// Compile a merged document into a model graph.
pub fn build(document: &Document, options: &BuildOptions) -> Result<ModelGraph, BuildError> {
    check_version(document)?;

    let definitions = document.definitions()?;
    let mut ctx = BuildContext::new(document, &definitions, options);
    info!(definitions = definitions.len(), "building model graph");

    // Phase 1: every entity exists before any relationship is placed.
    scalar::run(&mut ctx)?;
    compose::run(&mut ctx)?;

    // Phase 2: relationships, with keys deferred.
    choice::run(&mut ctx)?;
    relation::run(&mut ctx)?;

    // Phase 3: bind deferred keys.
    info!(keys = ctx.pending.len(), "binding foreign keys");
    bind::run(&mut ctx)?;

    let (entities, join_tables) = ctx.finish();
    let servers = document.servers()?;
    let endpoints = endpoint::collect(document, &servers, &entities, options)?;
    let microservices = endpoint::microservices(document, &servers)?;
    let namespaces = namespace::assemble(&entities, &join_tables, &endpoints)?;

    info!(
        entities = entities.len(),
        join_tables = join_tables.len(),
        endpoints = endpoints.len(),
        namespaces = namespaces.len(),
        "built model graph"
    );

    Ok(ModelGraph::new(
        entities,
        join_tables,
        endpoints,
        namespaces,
        servers,
        microservices,
        options.clone(),
    ))
}

// check_version
fn check_version(document: &Document) -> Result<(), BuildError> {
    match document.version() {
        Some(version) if version.starts_with(SUPPORTED_VERSION_PREFIX) => Ok(()),
        Some(version) => Err(BuildError::shape(
            "openapi",
            format!("version '{version}' is not supported; expected 3.x"),
        )),
        None => Err(BuildError::shape("openapi", "missing version field")),
    }
}
