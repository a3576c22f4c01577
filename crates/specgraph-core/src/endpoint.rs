//! Endpoint descriptors for each path item.

use crate::{error::BuildError, model::Entity, options::BuildOptions};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use specgraph_schema::{
    node::{
        Content, Document, Operation, Parameter, PathItem, Response, SchemaObject, Server,
        microservice_name,
    },
    resolve::{Reference, definition_name, lookup},
    types::HttpMethod,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Success codes in order of preference; the first declared one wins.
pub const SUCCESS_CODES: [u16; 3] = [200, 201, 202];

/// Success code whose response carries no body.
pub const NO_CONTENT: u16 = 204;

///
/// Endpoint
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Endpoint {
    pub path: String,
    pub namespace: String,

    /// Named by the path-level servers, else by the top-level ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microservice: Option<String>,

    /// One entry per supported method, declared or not.
    pub methods: BTreeMap<HttpMethod, EndpointMethod>,
}

impl Endpoint {
    #[must_use]
    pub fn new(path: impl Into<String>, namespace: impl Into<String>) -> Self {
        let methods = HttpMethod::SUPPORTED
            .into_iter()
            .map(|m| (m, EndpointMethod::default()))
            .collect();

        Self {
            path: path.into(),
            namespace: namespace.into(),
            microservice: None,
            methods,
        }
    }

    pub fn supported(&self) -> impl Iterator<Item = (HttpMethod, &EndpointMethod)> {
        self.methods
            .iter()
            .filter(|(_, m)| m.supported)
            .map(|(method, m)| (*method, m))
    }
}

///
/// EndpointMethod
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EndpointMethod {
    pub supported: bool,

    /// Entity name of the JSON request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<EndpointResponse>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<String>,
}

///
/// EndpointResponse
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EndpointResponse {
    pub success_code: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

/// Collect one endpoint per path item, in document order.
pub fn collect(
    document: &Document,
    servers: &[Server],
    entities: &IndexMap<String, Entity>,
    options: &BuildOptions,
) -> Result<IndexMap<String, Endpoint>, BuildError> {
    let fallback = microservice_name(servers);
    let mut endpoints = IndexMap::new();

    for (path, item) in document.paths()? {
        let namespace = item
            .namespace
            .clone()
            .unwrap_or_else(|| options.default_namespace.clone());
        let mut endpoint = Endpoint::new(&path, namespace);
        endpoint.microservice = microservice_name(&item.servers)
            .or(fallback)
            .map(str::to_string);

        for (method, value) in item.operations() {
            if !method.is_supported() {
                warn!(path = %path, %method, "ignoring unsupported method");
                continue;
            }

            let operation = Operation::from_value(&path, method, value)?;
            let owner = format!("{method} {path}");
            let compiled = compile_method(document, entities, &owner, &item, &operation)?;

            debug!(endpoint = %owner, request = ?compiled.request, "collected method");
            endpoint.methods.insert(method, compiled);
        }

        endpoints.insert(path, endpoint);
    }

    Ok(endpoints)
}

/// Every microservice the top-level or a path-level server list names,
/// in first-mention order.
pub fn microservices(document: &Document, servers: &[Server]) -> Result<Vec<String>, BuildError> {
    let paths = document.paths()?;
    let lists = std::iter::once(servers)
        .chain(paths.values().map(|item| item.servers.as_slice()));
    let mut names: Vec<String> = Vec::new();

    for server in lists.flatten() {
        if let Some(microservice) = &server.microservice
            && !names.contains(&microservice.name)
        {
            names.push(microservice.name.clone());
        }
    }

    Ok(names)
}

// compile_method
fn compile_method(
    document: &Document,
    entities: &IndexMap<String, Entity>,
    owner: &str,
    item: &PathItem,
    operation: &Operation,
) -> Result<EndpointMethod, BuildError> {
    let request = match &operation.request_body {
        Some(body) => {
            let body = match &body.reference {
                Some(reference) => local(document, owner, reference)?,
                None => body.clone(),
            };
            match body.json_schema() {
                Some(schema) => entity_name(entities, owner, schema)?,
                None => None,
            }
        }
        None => None,
    };

    Ok(EndpointMethod {
        supported: true,
        request,
        response: Some(success_response(document, entities, owner, operation)?),
        query_params: query_params(document, owner, item, operation)?,
    })
}

// success_response
fn success_response(
    document: &Document,
    entities: &IndexMap<String, Entity>,
    owner: &str,
    operation: &Operation,
) -> Result<EndpointResponse, BuildError> {
    for code in SUCCESS_CODES {
        let Some(response) = operation.responses.get(&code.to_string()) else {
            continue;
        };
        let response = match &response.reference {
            Some(reference) => local::<Response>(document, owner, reference)?,
            None => response.clone(),
        };
        let entity = match response.json_schema() {
            Some(schema) => entity_name(entities, owner, schema)?,
            None => None,
        };

        return Ok(EndpointResponse {
            success_code: code,
            entity,
        });
    }

    if operation.responses.contains_key(&NO_CONTENT.to_string()) {
        return Ok(EndpointResponse {
            success_code: NO_CONTENT,
            entity: None,
        });
    }

    Err(BuildError::shape(
        owner,
        "no 200, 201, 202 or 204 response is declared",
    ))
}

// query_params
// path-level parameters first, then the operation's, without repeats
fn query_params(
    document: &Document,
    owner: &str,
    item: &PathItem,
    operation: &Operation,
) -> Result<Vec<String>, BuildError> {
    let mut names: Vec<String> = Vec::new();

    for param in item.parameters.iter().chain(&operation.parameters) {
        let param = match &param.reference {
            Some(reference) => local::<Parameter>(document, owner, reference)?,
            None => param.clone(),
        };
        if param.is_query() && !names.contains(&param.name) {
            names.push(param.name);
        }
    }

    Ok(names)
}

// entity_name
// a body names its entity through a reference, array items or its title
fn entity_name(
    entities: &IndexMap<String, Entity>,
    owner: &str,
    schema: &SchemaObject,
) -> Result<Option<String>, BuildError> {
    let reference = schema.reference.as_deref().or_else(|| schema.items_ref());

    match reference {
        Some(reference) => definition_name(reference)
            .filter(|name| entities.contains_key(name))
            .map(Some)
            .ok_or_else(|| BuildError::broken(owner, reference)),
        None => Ok(schema.title.clone()),
    }
}

// local
// reads a local `$ref` into the component it points at
fn local<T: DeserializeOwned>(
    document: &Document,
    owner: &str,
    reference: &str,
) -> Result<T, BuildError> {
    let Reference::Local(fragment) = Reference::parse(reference)? else {
        return Err(BuildError::broken(owner, reference));
    };
    let node = lookup(&document.value, &fragment)
        .ok_or_else(|| BuildError::broken(owner, reference))?;

    T::deserialize(node).map_err(|error| {
        BuildError::shape(owner, format!("'{reference}' is malformed: {error}"))
    })
}
