//! Schema documents, reference resolution and multi-file merging.
//!
//! ## Layout
//! - `load`: read and write JSON / YAML documents by extension.
//! - `resolve`: parse `$ref` strings and follow them across files.
//! - `merge`: inline cross-file references into one local document.
//! - `node`: typed views over definitions and path items.
//! - `types`: primitive type names and HTTP methods.

pub mod load;
pub mod merge;
pub mod node;
pub mod resolve;
pub mod types;

/// JSON pointer of the definition table inside a document.
pub const DEFINITIONS_POINTER: &str = "/components/schemas";

/// Prefix for local references into the definition table.
pub const DEFINITION_REF_PREFIX: &str = "#/components/schemas/";

/// Key holding a reference string inside a schema object.
pub const REF_KEY: &str = "$ref";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        node::{Document, PathItem, SchemaObject},
        resolve::{Reference, Resolver},
        types::{HttpMethod, Multiplicity, Primitive},
    };
    pub use indexmap::IndexMap;
    pub use serde::{Deserialize, Serialize};
}
