use serde::{Deserialize, Serialize};

///
/// Server
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Server {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        rename = "x-microservice",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub microservice: Option<Microservice>,
}

///
/// Microservice
///
/// Marks the server list it appears in as one deployable unit.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Microservice {
    pub name: String,
}

/// First microservice named in a server list.
#[must_use]
pub fn microservice_name(servers: &[Server]) -> Option<&str> {
    servers
        .iter()
        .find_map(|server| server.microservice.as_ref())
        .map(|microservice| microservice.name.as_str())
}
