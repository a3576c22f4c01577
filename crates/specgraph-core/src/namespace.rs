//! Grouping of the compiled graph by namespace.

use crate::{
    endpoint::Endpoint,
    error::BuildError,
    model::{Entity, JoinTable},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Namespace
///
/// Names of everything sharing one namespace tag. Relationships are keyed
/// `<Entity>.<relationship>`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Namespace {
    pub entities: Vec<String>,
    pub relationships: Vec<String>,
    pub join_tables: Vec<String>,
    pub endpoints: Vec<String>,
}

impl Namespace {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
            && self.relationships.is_empty()
            && self.join_tables.is_empty()
            && self.endpoints.is_empty()
    }
}

/// Bucket entities, relationships, join tables and endpoints by namespace.
pub fn assemble(
    entities: &IndexMap<String, Entity>,
    join_tables: &IndexMap<String, JoinTable>,
    endpoints: &IndexMap<String, Endpoint>,
) -> Result<BTreeMap<String, Namespace>, BuildError> {
    let mut namespaces: BTreeMap<String, Namespace> = BTreeMap::new();

    for (name, entity) in entities {
        let ns = bucket(&mut namespaces, &entity.namespace, name)?;
        ns.entities.push(name.clone());
        ns.relationships.extend(
            entity
                .relationships
                .keys()
                .map(|rel| format!("{name}.{rel}")),
        );
    }

    for (name, table) in join_tables {
        bucket(&mut namespaces, &table.namespace, name)?
            .join_tables
            .push(name.clone());
    }

    for (path, endpoint) in endpoints {
        bucket(&mut namespaces, &endpoint.namespace, path)?
            .endpoints
            .push(path.clone());
    }

    Ok(namespaces)
}

// bucket
fn bucket<'a>(
    namespaces: &'a mut BTreeMap<String, Namespace>,
    namespace: &str,
    owner: &str,
) -> Result<&'a mut Namespace, BuildError> {
    if namespace.trim().is_empty() {
        return Err(BuildError::MissingNamespace {
            name: owner.to_string(),
        });
    }

    Ok(namespaces.entry(namespace.to_string()).or_default())
}
