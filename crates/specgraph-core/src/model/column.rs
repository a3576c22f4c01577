use crate::FOREIGN_KEY_LENGTH;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use specgraph_schema::{node::SchemaObject, types::Primitive};

///
/// ColumnType
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ColumnType {
    Boolean,
    Float,
    Integer,
    String,
}

impl From<Primitive> for ColumnType {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Boolean => Self::Boolean,
            Primitive::Integer => Self::Integer,
            Primitive::Number => Self::Float,
            Primitive::String => Self::String,
        }
    }
}

///
/// Column
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Column {
    #[serde(rename = "type")]
    pub ty: ColumnType,

    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// `namespace.table.primaryKey` of the referenced entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Allowed values, as text; non-string values keep their JSON form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    /// Regular expression the value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Column {
    #[must_use]
    pub const fn new(ty: ColumnType, nullable: bool) -> Self {
        Self {
            ty,
            nullable,
            max_length: None,
            foreign_key: None,
            description: None,
            enum_values: None,
            pattern: None,
        }
    }

    /// A column for a primitive schema, keeping its length, description,
    /// enumeration and pattern.
    #[must_use]
    pub fn from_schema(primitive: Primitive, schema: &SchemaObject, nullable: bool) -> Self {
        let enum_values = (!schema.enum_values.is_empty()).then(|| {
            schema
                .enum_values
                .iter()
                .map(|value| match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect()
        });

        Self {
            max_length: schema.max_length,
            description: schema.description.clone(),
            enum_values,
            pattern: schema.pattern.clone(),
            ..Self::new(ColumnType::from(primitive), nullable)
        }
    }

    /// A nullable textual key column pointing at `target`.
    #[must_use]
    pub fn foreign_key(target: impl Into<String>) -> Self {
        Self {
            max_length: Some(FOREIGN_KEY_LENGTH),
            foreign_key: Some(target.into()),
            ..Self::new(ColumnType::String, true)
        }
    }

    #[must_use]
    pub const fn is_foreign_key(&self) -> bool {
        self.foreign_key.is_some()
    }
}
