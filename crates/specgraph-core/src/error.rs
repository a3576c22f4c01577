use specgraph_schema::{node::NodeError, resolve::ResolveError};
use thiserror::Error as ThisError;

///
/// BuildError
///
/// Every failure aborts the build; no partial graph is returned.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum BuildError {
    #[error("broken reference in '{owner}': '{reference}' names no definition")]
    BrokenReference { owner: String, reference: String },

    #[error("'{name}' has no namespace")]
    MissingNamespace { name: String },

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("unsupported schema shape in '{owner}': {reason}")]
    SchemaShape { owner: String, reason: String },

    #[error(
        "many-to-many between '{from}' ({from_namespace}) and '{to}' ({to_namespace}) needs a join table across namespaces"
    )]
    UnsupportedRelationship {
        from: String,
        from_namespace: String,
        to: String,
        to_namespace: String,
    },
}

impl BuildError {
    pub(crate) fn shape(owner: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaShape {
            owner: owner.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn broken(owner: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::BrokenReference {
            owner: owner.into(),
            reference: reference.into(),
        }
    }
}
