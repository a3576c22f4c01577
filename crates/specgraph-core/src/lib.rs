//! Model graph compilation: entities, relationships and foreign keys built
//! from a merged schema document, plus the endpoint and namespace views the
//! emitters consume.

pub mod build;
pub mod endpoint;
pub mod error;
pub mod graph;
pub mod infer;
pub mod model;
pub mod namespace;
pub mod options;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use build::build;
pub use error::BuildError;
pub use graph::ModelGraph;
pub use options::BuildOptions;

///
/// CONSTANTS
///

/// Primary key column name when the options do not name one.
pub const DEFAULT_PRIMARY_KEY: &str = "identifier";

/// Namespace for definitions and paths without an `x-namespace`.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Storage length of a foreign-key column (a textual uuid).
pub const FOREIGN_KEY_LENGTH: u32 = 36;

///
/// Prelude
///
/// Domain vocabulary only; no builders or errors.
///

pub mod prelude {
    pub use crate::{
        endpoint::{Endpoint, EndpointMethod},
        graph::ModelGraph,
        model::{Cardinality, Column, ColumnType, Entity, JoinTable, Relationship},
        namespace::Namespace,
        options::BuildOptions,
    };
}
