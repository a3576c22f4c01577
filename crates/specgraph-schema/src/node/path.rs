use crate::{
    node::{NodeError, SchemaObject, Server},
    types::HttpMethod,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

///
/// PathItem
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PathItem {
    #[serde(rename = "x-namespace", skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    /// Everything else, including the method objects.
    #[serde(flatten)]
    pub entries: IndexMap<String, Value>,
}

impl PathItem {
    /// Declared operations in declaration order. Entries that are not HTTP
    /// method names (`summary`, extensions) are skipped.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Value)> {
        self.entries.iter().filter_map(|(key, value)| {
            HttpMethod::ALL
                .into_iter()
                .find(|m| key == m.as_str())
                .map(|m| (m, value))
        })
    }
}

///
/// Operation
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,

    pub responses: IndexMap<String, Response>,
}

impl Operation {
    /// Read the operation declared for `method` under `path`.
    pub fn from_value(path: &str, method: HttpMethod, value: &Value) -> Result<Self, NodeError> {
        Self::deserialize(value).map_err(|error| NodeError::Operation {
            path: path.to_string(),
            method,
            error,
        })
    }
}

///
/// Parameter
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Parameter {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    pub name: String,

    #[serde(rename = "in")]
    pub location: String,

    pub required: bool,
}

impl Parameter {
    #[must_use]
    pub fn is_query(&self) -> bool {
        self.location == "query"
    }
}

///
/// RequestBody
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestBody {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    pub content: IndexMap<String, MediaType>,
}

///
/// Response
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Response {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub content: IndexMap<String, MediaType>,
}

///
/// MediaType
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaObject>,
}

/// Media type endpoint bodies are read from.
pub const JSON_MEDIA_TYPE: &str = "application/json";

///
/// Content
///
/// Shared read of the JSON body schema of a request or response.
///

pub trait Content {
    fn content(&self) -> &IndexMap<String, MediaType>;

    /// The `application/json` body schema, if declared.
    fn json_schema(&self) -> Option<&SchemaObject> {
        self.content()
            .get(JSON_MEDIA_TYPE)
            .and_then(|media| media.schema.as_ref())
    }
}

impl Content for RequestBody {
    fn content(&self) -> &IndexMap<String, MediaType> {
        &self.content
    }
}

impl Content for Response {
    fn content(&self) -> &IndexMap<String, MediaType> {
        &self.content
    }
}
