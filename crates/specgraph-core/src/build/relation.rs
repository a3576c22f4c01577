//! Pass 4: plain reference properties and array definitions.

use crate::{
    build::{
        BuildContext,
        link::{self, Link, LinkKind},
    },
    error::BuildError,
};
use specgraph_schema::types::Multiplicity;
use specgraph_utils::{column_ident, flat};

pub fn run(ctx: &mut BuildContext<'_>) -> Result<(), BuildError> {
    let definitions = ctx.definitions;

    for (name, schema) in definitions {
        // an array definition relates to its item type
        if schema.is_array()
            && let Some(reference) = schema.items_ref()
        {
            let (target, _) = ctx.definition(name, reference)?;
            let link = Link {
                source: name,
                name: flat(target),
                target,
                forward: Multiplicity::Many,
                kind: LinkKind::Definition,
                back_reference: Some(flat(name)),
            };
            link::place(ctx, link)?;
        }

        for (prop_name, prop) in &schema.properties {
            if !prop.one_of.is_empty() {
                continue;
            }
            let Some((reference, forward)) = prop.ref_target() else {
                continue;
            };

            let owner = format!("{name}.{prop_name}");
            let (target, _) = ctx.definition(&owner, reference)?;
            let link = Link {
                source: name,
                name: column_ident(prop_name),
                target,
                forward,
                kind: LinkKind::Property(prop_name),
                back_reference: None,
            };
            link::place(ctx, link)?;
        }
    }

    Ok(())
}
