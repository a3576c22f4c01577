//! Cardinality inference from reciprocal references.

use crate::model::Cardinality;
use specgraph_schema::{node::SchemaObject, resolve::definition_name, types::Multiplicity};

///
/// BackReference
///
/// A property on the target that points back at the source.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackReference<'a> {
    pub property: &'a str,
    pub multiplicity: Multiplicity,
}

/// Infer the cardinality of `source -> target`, where the source holds
/// `forward` targets. On a self reference `origin` (the property the
/// reference was found on) is not counted as evidence.
#[must_use]
pub fn infer(
    source: &str,
    forward: Multiplicity,
    target_name: &str,
    target: &SchemaObject,
    origin: Option<&str>,
) -> Cardinality {
    let reverse = back_reference(source, target_name, target, origin).map(|b| b.multiplicity);

    Cardinality::from_evidence(forward, reverse)
}

/// First property of `target` referencing `source`, scanning direct refs,
/// array items and `oneOf` alternatives in declaration order.
#[must_use]
pub fn back_reference<'a>(
    source: &str,
    target_name: &str,
    target: &'a SchemaObject,
    origin: Option<&str>,
) -> Option<BackReference<'a>> {
    let self_reference = source == target_name;

    target
        .properties
        .iter()
        .filter(|(name, _)| !(self_reference && origin == Some(name.as_str())))
        .find_map(|(name, prop)| {
            prop.references()
                .into_iter()
                .find(|(reference, _)| definition_name(reference).as_deref() == Some(source))
                .map(|(_, multiplicity)| BackReference {
                    property: name.as_str(),
                    multiplicity,
                })
        })
}
