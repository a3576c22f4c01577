//! Foreign-key binding, run once every entity exists.

use crate::{
    build::{BuildContext, KeyOwner, PendingKey},
    error::BuildError,
    model::Column,
};
use tracing::debug;

pub fn run(ctx: &mut BuildContext<'_>) -> Result<(), BuildError> {
    let pending = std::mem::take(&mut ctx.pending);

    for PendingKey {
        owner,
        column,
        target,
    } in pending
    {
        let reference = ctx
            .entities
            .get(&target)
            .map(crate::model::Entity::foreign_key_target)
            .ok_or_else(|| BuildError::broken(owner_name(&owner), &target))?;

        let columns = match &owner {
            KeyOwner::Entity(name) => &mut ctx.entity_mut(name)?.columns,
            KeyOwner::JoinTable(name) => {
                &mut ctx
                    .join_tables
                    .get_mut(name)
                    .ok_or_else(|| BuildError::broken(name, name))?
                    .columns
            }
        };

        debug!(owner = owner_name(&owner), column = %column, references = %reference, "bound key");

        // a declared column of the same name keeps its shape
        match columns.get_mut(&column) {
            Some(existing) => existing.foreign_key = Some(reference),
            None => {
                columns.insert(column, Column::foreign_key(reference));
            }
        }
    }

    Ok(())
}

// owner_name
fn owner_name(owner: &KeyOwner) -> &str {
    match owner {
        KeyOwner::Entity(name) | KeyOwner::JoinTable(name) => name,
    }
}
