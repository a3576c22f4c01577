use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Primitive
///
/// Scalar type names that compile to a single column.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    #[display("boolean")]
    Boolean,

    #[display("integer")]
    Integer,

    #[display("number")]
    Number,

    #[display("string")]
    String,
}

impl Primitive {
    /// Parse a schema `type` name; `None` for `array`, `object` and anything unknown.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Self::Boolean),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            _ => None,
        }
    }
}

///
/// Multiplicity
///
/// How many instances of a target one side of a reference holds:
/// a scalar `$ref` is `One`, an array of `$ref` items is `Many`.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Multiplicity {
    One,
    Many,
}

impl Multiplicity {
    #[must_use]
    pub const fn is_many(self) -> bool {
        matches!(self, Self::Many)
    }
}

///
/// HttpMethod
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    #[display("delete")]
    Delete,

    #[display("get")]
    Get,

    #[display("head")]
    Head,

    #[display("options")]
    Options,

    #[display("patch")]
    Patch,

    #[display("post")]
    Post,

    #[display("put")]
    Put,

    #[display("trace")]
    Trace,
}

impl HttpMethod {
    /// Every method a path item may declare, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];

    /// Methods that compile to endpoint handlers.
    pub const SUPPORTED: [Self; 4] = [Self::Get, Self::Put, Self::Post, Self::Delete];

    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Get | Self::Put | Self::Post | Self::Delete)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Get => "get",
            Self::Head => "head",
            Self::Options => "options",
            Self::Patch => "patch",
            Self::Post => "post",
            Self::Put => "put",
            Self::Trace => "trace",
        }
    }
}
