use crate::types::{Multiplicity, Primitive};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

///
/// SchemaObject
///
/// The subset of a schema object the model builder reads. Unknown keys are
/// ignored; extension keys are mapped explicitly.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaObject {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaObject>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaObject>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaObject>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaObject>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(rename = "x-namespace", skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(rename = "x-table-name", skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,

    /// Plural form used for the table name instead of the inflected one.
    #[serde(rename = "x-plural", skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
}

impl SchemaObject {
    /// The declared primitive type, if the `type` is one.
    #[must_use]
    pub fn primitive(&self) -> Option<Primitive> {
        self.ty.as_deref().and_then(Primitive::from_type_name)
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.ty.as_deref() == Some("array")
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.ty.as_deref() == Some("object")
    }

    #[must_use]
    pub const fn is_alias(&self) -> bool {
        self.reference.is_some()
    }

    /// True when the schema has a body the builder can compile.
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.properties.is_empty() || !self.all_of.is_empty() || !self.one_of.is_empty()
    }

    /// An object declared inline with its own properties.
    #[must_use]
    pub fn is_anonymous_object(&self) -> bool {
        !self.is_alias() && (self.is_object() || !self.properties.is_empty())
    }

    #[must_use]
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }

    /// The `$ref` of the array's items, if they are a reference.
    #[must_use]
    pub fn items_ref(&self) -> Option<&str> {
        self.items.as_deref().and_then(|items| items.reference.as_deref())
    }

    /// The reference this schema points through and how many targets it holds:
    /// a direct `$ref` is one, an array of `$ref` items is many.
    #[must_use]
    pub fn ref_target(&self) -> Option<(&str, Multiplicity)> {
        if let Some(reference) = self.reference.as_deref() {
            return Some((reference, Multiplicity::One));
        }
        if self.is_array() {
            return self.items_ref().map(|r| (r, Multiplicity::Many));
        }

        None
    }

    /// Every definition reference held by this schema as a property:
    /// the direct or items reference plus each `oneOf` alternative.
    #[must_use]
    pub fn references(&self) -> Vec<(&str, Multiplicity)> {
        let mut out: Vec<_> = self.ref_target().into_iter().collect();
        out.extend(self.one_of.iter().filter_map(Self::ref_target));

        out
    }
}
