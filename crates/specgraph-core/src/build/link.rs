//! Relationship placement shared by the `oneOf` and reference passes.
//!
//! Placement per inferred cardinality, for `source -> target`:
//!
//! | cardinality    | key owner           | key column            |
//! |----------------|---------------------|-----------------------|
//! | `TO_ONE`       | source              | `<target>_id`         |
//! | `TO_MANY`      | target              | `<source>_id`         |
//! | `ONE_TO_ONE`   | name-sorted first   | `<sorted second>_id`  |
//! | `ONE_TO_MANY`  | target              | `<source>_id`         |
//! | `MANY_TO_ONE`  | source              | `<target>_id`         |
//! | `MANY_TO_MANY` | join table          | one key per side      |

use crate::{
    build::{BuildContext, KeyOwner},
    error::BuildError,
    infer::infer,
    model::{Cardinality, JoinTable, Relationship},
};
use specgraph_schema::types::Multiplicity;
use tracing::debug;

///
/// LinkKind
///
/// Where in the source definition the reference was found.
///

#[derive(Clone, Copy, Debug)]
pub enum LinkKind<'s> {
    /// A `$ref` or array of `$ref` property.
    Property(&'s str),

    /// A `oneOf` alternative; `None` when the `oneOf` is on the definition.
    OneOf(Option<&'s str>),

    /// The definition itself is an array of references.
    Definition,
}

impl<'s> LinkKind<'s> {
    const fn origin(self) -> Option<&'s str> {
        match self {
            Self::Property(property) => Some(property),
            Self::OneOf(property) => property,
            Self::Definition => None,
        }
    }
}

///
/// Link
///

#[derive(Clone, Debug)]
pub struct Link<'s> {
    pub source: &'s str,
    pub name: String,
    pub target: &'s str,
    pub forward: Multiplicity,
    pub kind: LinkKind<'s>,

    /// Overrides the back reference the cardinality would give.
    pub back_reference: Option<String>,
}

/// Infer the link's cardinality, record its keys and add its relationship.
pub fn place(ctx: &mut BuildContext<'_>, link: Link<'_>) -> Result<Cardinality, BuildError> {
    let definitions = ctx.definitions;
    let target_schema = definitions
        .get(link.target)
        .ok_or_else(|| BuildError::broken(link.source, link.target))?;

    let cardinality = infer(
        link.source,
        link.forward,
        link.target,
        target_schema,
        link.kind.origin(),
    );

    let source = ctx.entity(link.source)?;
    let target = ctx.entity(link.target)?;
    let (source_label, target_label) = (source.label(), target.label());
    let (source_ns, target_ns) = (source.namespace.clone(), target.namespace.clone());

    let mut relationship = Relationship::new(link.target, cardinality, link.forward.is_many());
    let mut keep = true;

    match cardinality {
        Cardinality::ToOne => {
            ctx.defer_key(
                KeyOwner::Entity(link.source.to_string()),
                format!("{target_label}_id"),
                link.target,
            );
        }
        Cardinality::ToMany => {
            ctx.defer_key(
                KeyOwner::Entity(link.target.to_string()),
                format!("{source_label}_id"),
                link.source,
            );
        }
        Cardinality::OneToOne => {
            let (first, second) = if link.source <= link.target {
                (link.source, link.target)
            } else {
                (link.target, link.source)
            };
            let second_label = if second == link.source {
                &source_label
            } else {
                &target_label
            };

            ctx.defer_key(
                KeyOwner::Entity(first.to_string()),
                format!("{second_label}_id"),
                second,
            );
            relationship = relationship.with_back_reference(source_label.clone());
        }
        Cardinality::OneToMany => {
            ctx.defer_key(
                KeyOwner::Entity(link.target.to_string()),
                format!("{source_label}_id"),
                link.source,
            );
            relationship = relationship.with_back_reference(source_label.clone());
        }
        Cardinality::ManyToOne => {
            ctx.defer_key(
                KeyOwner::Entity(link.source.to_string()),
                format!("{target_label}_id"),
                link.target,
            );
            // the target's one-to-many back reference covers plain properties
            keep = matches!(link.kind, LinkKind::OneOf(_));
        }
        Cardinality::ManyToMany => {
            if source_ns != target_ns {
                return Err(BuildError::UnsupportedRelationship {
                    from: link.source.to_string(),
                    from_namespace: source_ns,
                    to: link.target.to_string(),
                    to_namespace: target_ns,
                });
            }

            let name = JoinTable::name_for(&source_label, &target_label);
            let mut entities = [link.source.to_string(), link.target.to_string()];
            entities.sort();
            ctx.join_tables
                .entry(name.clone())
                .or_insert_with(|| JoinTable::new(name.clone(), source_ns, entities));

            ctx.defer_key(
                KeyOwner::JoinTable(name.clone()),
                format!("{source_label}_id"),
                link.source,
            );
            ctx.defer_key(
                KeyOwner::JoinTable(name.clone()),
                format!("{target_label}_id"),
                link.target,
            );
            relationship = relationship.with_join_table(name);
        }
    }

    if let Some(back_reference) = link.back_reference {
        relationship.back_reference = Some(back_reference);
    }

    debug!(
        source = link.source,
        relationship = %link.name,
        target = link.target,
        %cardinality,
        kept = keep,
        "placed relationship"
    );

    if keep {
        ctx.entity_mut(link.source)?
            .add_relationship(link.name, relationship);
    }

    Ok(cardinality)
}
