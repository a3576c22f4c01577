//! Pass 2: fold `allOf` members into their entity.

use crate::{build::BuildContext, build::scalar::add_scalar_columns, error::BuildError};
use tracing::debug;

pub fn run(ctx: &mut BuildContext<'_>) -> Result<(), BuildError> {
    let definitions = ctx.definitions;

    for (name, schema) in definitions.iter().filter(|(_, s)| !s.all_of.is_empty()) {
        for member in &schema.all_of {
            // referenced members contribute their own properties only
            let (origin, resolved) = match member.reference.as_deref() {
                Some(reference) => {
                    let (origin, resolved) = ctx.resolve_schema(reference)?;
                    (origin, Some(resolved))
                }
                None => ("inline".to_string(), None),
            };
            let member = resolved.as_ref().unwrap_or(member);

            let entity = ctx.entity_mut(name)?;
            add_scalar_columns(entity, &member.properties, &[schema, member]);

            debug!(entity = %name, member = %origin, "folded allOf member");
        }
    }

    Ok(())
}
