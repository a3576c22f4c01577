use derive_more::Display;
use serde::{Deserialize, Serialize};
use specgraph_config_build::ConfigError;
use specgraph_core::BuildError;
use specgraph_schema::{
    load::LoadError, merge::MergeError, node::NodeError, resolve::ResolveError,
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        let kind = match err {
            LoadError::Format { .. } | LoadError::Json { .. } | LoadError::Yaml { .. } => {
                ErrorKind::Format
            }
            LoadError::Io { .. } => ErrorKind::Io,
        };

        Self::new(kind, ErrorOrigin::Load, err.to_string())
    }
}

impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        resolve_error(err, ErrorOrigin::Resolve)
    }
}

impl From<MergeError> for Error {
    fn from(err: MergeError) -> Self {
        match err {
            MergeError::Resolve(err) => resolve_error(err, ErrorOrigin::Merge),
            MergeError::NameCollision { .. } | MergeError::Shape { .. } => {
                Self::new(ErrorKind::SchemaShape, ErrorOrigin::Merge, err.to_string())
            }
        }
    }
}

impl From<NodeError> for Error {
    fn from(err: NodeError) -> Self {
        Self::new(ErrorKind::SchemaShape, ErrorOrigin::Node, err.to_string())
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        let kind = match err {
            BuildError::Resolve(err) => return resolve_error(err, ErrorOrigin::Build),
            BuildError::BrokenReference { .. } => ErrorKind::BrokenReference,
            BuildError::UnsupportedRelationship { .. } => ErrorKind::UnsupportedRelationship,
            BuildError::MissingNamespace { .. }
            | BuildError::Node(_)
            | BuildError::SchemaShape { .. } => ErrorKind::SchemaShape,
        };

        Self::new(kind, ErrorOrigin::Build, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

// resolve_error
// file errors keep their load kind, with the caller's origin
fn resolve_error(err: ResolveError, origin: ErrorOrigin) -> Error {
    let kind = match err {
        ResolveError::BrokenReference { .. } => ErrorKind::BrokenReference,
        ResolveError::MalformedReference { .. } | ResolveError::ReferenceCycle { .. } => {
            ErrorKind::SchemaShape
        }
        ResolveError::Load(err) => {
            let Error { kind, message, .. } = err.into();
            return Error::new(kind, origin, message);
        }
    };

    Error::new(kind, origin, err.to_string())
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorKind {
    /// A reference or name points at nothing.
    BrokenReference,

    /// The option file could not be read or parsed.
    Config,

    /// Unrecognized file extension or unparseable document.
    Format,

    /// The caller cannot remediate this.
    Internal,

    Io,

    /// The document uses a shape the compiler does not support.
    SchemaShape,

    /// Many-to-many across namespaces.
    UnsupportedRelationship,
}

///
/// ErrorOrigin
/// The layer that raised the error.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorOrigin {
    Build,
    Config,
    Interface,
    Load,
    Merge,
    Node,
    Resolve,
}
