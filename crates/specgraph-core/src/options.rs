use crate::{DEFAULT_NAMESPACE, DEFAULT_PRIMARY_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// BuildOptions
///
/// Caller-supplied knobs. Naming templates and base classes are carried
/// through to the graph untouched for the emitters.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct BuildOptions {
    pub default_namespace: String,
    pub primary_key: String,
    pub naming: NamingTemplates,

    /// Resource name -> table name overrides.
    pub table_names: BTreeMap<String, String>,

    /// Emitted artifact kind -> base class path.
    pub base_classes: BTreeMap<String, String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            naming: NamingTemplates::default(),
            table_names: BTreeMap::new(),
            base_classes: BTreeMap::new(),
        }
    }
}

impl BuildOptions {
    #[must_use]
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    #[must_use]
    pub fn with_table_name(
        mut self,
        resource: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        self.table_names.insert(resource.into(), table.into());
        self
    }
}

///
/// NamingTemplates
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct NamingTemplates {
    pub model: String,
    pub schema: String,
    pub controller: String,
}

impl Default for NamingTemplates {
    fn default() -> Self {
        Self {
            model: "{resource}Model".to_string(),
            schema: "{resource}Schema".to_string(),
            controller: "{resource}{controller_type}Controller".to_string(),
        }
    }
}
