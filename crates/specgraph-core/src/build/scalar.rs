//! Pass 1: create every entity and its primitive columns.

use crate::{
    build::BuildContext,
    error::BuildError,
    model::{Column, Entity},
};
use indexmap::IndexMap;
use specgraph_schema::node::SchemaObject;
use specgraph_utils::column_ident;
use tracing::debug;

pub fn run(ctx: &mut BuildContext<'_>) -> Result<(), BuildError> {
    let definitions = ctx.definitions;

    for (name, schema) in definitions {
        validate_definition(name, schema)?;

        let mut entity = Entity::from_definition(name, schema, ctx.options);
        for (prop_name, prop) in &schema.properties {
            validate_property(name, prop_name, prop)?;
        }
        add_scalar_columns(&mut entity, &schema.properties, &[schema]);

        debug!(entity = %name, columns = entity.columns.len(), "created entity");
        ctx.entities.insert(name.clone(), entity);
    }

    Ok(())
}

/// Add one column per primitive property. A property is required when any
/// schema in `required_by` lists it.
pub fn add_scalar_columns(
    entity: &mut Entity,
    properties: &IndexMap<String, SchemaObject>,
    required_by: &[&SchemaObject],
) {
    for (prop_name, prop) in properties {
        let Some(primitive) = prop.primitive() else {
            continue;
        };
        let required = required_by.iter().any(|s| s.is_required(prop_name));
        let column = Column::from_schema(primitive, prop, !required);

        entity.add_column(column_ident(prop_name), column);
    }
}

// validate_definition
fn validate_definition(name: &str, schema: &SchemaObject) -> Result<(), BuildError> {
    if schema.is_alias() {
        return Err(BuildError::shape(name, "a definition cannot be a bare reference"));
    }
    if let Some(primitive) = schema.primitive() {
        return Err(BuildError::shape(
            name,
            format!("definition type is the bare primitive '{primitive}'"),
        ));
    }
    if schema.is_array() {
        if schema.items_ref().is_none() {
            return Err(BuildError::shape(
                name,
                "array items must reference a definition",
            ));
        }
    } else if !schema.has_body() {
        return Err(BuildError::shape(
            name,
            "definition needs properties, allOf or oneOf",
        ));
    }

    Ok(())
}

// validate_property
// non-primitive shapes later passes know how to compile pass through
fn validate_property(owner: &str, name: &str, prop: &SchemaObject) -> Result<(), BuildError> {
    if prop.primitive().is_some() || prop.is_alias() || !prop.one_of.is_empty() {
        return Ok(());
    }

    let reason = if prop.is_array() {
        match prop.items.as_deref() {
            Some(items) if items.is_alias() => return Ok(()),
            Some(items) if items.is_array() => "nested arrays are not supported",
            Some(items) if items.primitive().is_some() => {
                "arrays of primitives are not supported; reference a definition"
            }
            _ => "array items must reference a definition",
        }
    } else if !prop.all_of.is_empty() {
        "inline allOf on a property is not supported; reference a definition"
    } else if prop.is_anonymous_object() {
        "nested anonymous objects are not supported; reference a definition"
    } else {
        "property has no type"
    };

    Err(BuildError::shape(format!("{owner}.{name}"), reason))
}
