//! Pass 3: `oneOf` on properties and on definitions.
//!
//! Alternatives compile by kind: a primitive becomes a nullable column
//! `<prefix>_<type>`, a reference becomes `<prefix>_<target>` and an array
//! of references becomes `<prefix>_array_<target>`.

use crate::{
    build::{
        BuildContext,
        link::{self, Link, LinkKind},
    },
    error::BuildError,
    model::Column,
};
use specgraph_schema::node::SchemaObject;
use specgraph_utils::{column_ident, flat};
use tracing::debug;

pub fn run(ctx: &mut BuildContext<'_>) -> Result<(), BuildError> {
    let definitions = ctx.definitions;

    for (name, schema) in definitions {
        if !schema.one_of.is_empty() {
            let prefix = flat(name);
            expand(ctx, name, &prefix, None, &schema.one_of)?;
        }

        for (prop_name, prop) in schema.properties.iter().filter(|(_, p)| !p.one_of.is_empty()) {
            let prefix = column_ident(prop_name);
            expand(ctx, name, &prefix, Some(prop_name.as_str()), &prop.one_of)?;
        }
    }

    Ok(())
}

// expand
fn expand(
    ctx: &mut BuildContext<'_>,
    source: &str,
    prefix: &str,
    property: Option<&str>,
    alternatives: &[SchemaObject],
) -> Result<(), BuildError> {
    let owner = property.map_or_else(|| source.to_string(), |p| format!("{source}.{p}"));

    for alt in alternatives {
        if let Some(primitive) = alt.primitive() {
            let column = Column::from_schema(primitive, alt, true);

            ctx.entity_mut(source)?
                .add_column(format!("{prefix}_{primitive}"), column);
            continue;
        }

        let Some((reference, forward)) = alt.ref_target() else {
            return Err(BuildError::shape(
                owner,
                "oneOf alternatives must be primitives, references or arrays of references",
            ));
        };
        let (target, _) = ctx.definition(&owner, reference)?;
        let name = if forward.is_many() {
            format!("{prefix}_array_{}", flat(target))
        } else {
            format!("{prefix}_{}", flat(target))
        };

        debug!(source, relationship = %name, "oneOf alternative");
        link::place(
            ctx,
            Link {
                source,
                name,
                target,
                forward,
                kind: LinkKind::OneOf(property),
                back_reference: None,
            },
        )?;
    }

    Ok(())
}
