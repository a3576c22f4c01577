use crate::model::Column;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

///
/// JoinTable
///
/// Mapping table for a many-to-many pair inside one namespace.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JoinTable {
    pub name: String,
    pub namespace: String,

    /// The two entity names, sorted.
    pub entities: [String; 2],

    pub columns: IndexMap<String, Column>,
}

impl JoinTable {
    /// Join table name for two entity labels, independent of their order.
    #[must_use]
    pub fn name_for(a: &str, b: &str) -> String {
        if a <= b {
            format!("{a}{b}")
        } else {
            format!("{b}{a}")
        }
    }

    #[must_use]
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        entities: [String; 2],
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            entities,
            columns: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn joins(&self, entity: &str) -> bool {
        self.entities.iter().any(|e| e == entity)
    }
}
