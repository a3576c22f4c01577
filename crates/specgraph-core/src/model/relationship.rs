use derive_more::Display;
use serde::{Deserialize, Serialize};
use specgraph_schema::types::Multiplicity;

///
/// Cardinality
///
/// Named from the referencing side: `ManyToOne` means many of the source
/// point at one target.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cardinality {
    #[display("ONE_TO_ONE")]
    OneToOne,

    #[display("ONE_TO_MANY")]
    OneToMany,

    #[display("MANY_TO_ONE")]
    ManyToOne,

    #[display("MANY_TO_MANY")]
    ManyToMany,

    /// One target, and the target never points back.
    #[display("TO_ONE")]
    ToOne,

    /// Many targets, and the target never points back.
    #[display("TO_MANY")]
    ToMany,
}

impl Cardinality {
    /// Combine what the source holds with what the target holds back, if
    /// anything.
    #[must_use]
    pub const fn from_evidence(forward: Multiplicity, reverse: Option<Multiplicity>) -> Self {
        match (forward, reverse) {
            (Multiplicity::One, Some(Multiplicity::One)) => Self::OneToOne,
            (Multiplicity::One, Some(Multiplicity::Many)) => Self::ManyToOne,
            (Multiplicity::Many, Some(Multiplicity::One)) => Self::OneToMany,
            (Multiplicity::Many, Some(Multiplicity::Many)) => Self::ManyToMany,
            (Multiplicity::One, None) => Self::ToOne,
            (Multiplicity::Many, None) => Self::ToMany,
        }
    }

    /// The cardinality as seen from the target; directionless kinds have none.
    #[must_use]
    pub const fn inverse(self) -> Option<Self> {
        match self {
            Self::OneToOne => Some(Self::OneToOne),
            Self::OneToMany => Some(Self::ManyToOne),
            Self::ManyToOne => Some(Self::OneToMany),
            Self::ManyToMany => Some(Self::ManyToMany),
            Self::ToOne | Self::ToMany => None,
        }
    }

    /// True when the target points back at the source.
    #[must_use]
    pub const fn is_reciprocal(self) -> bool {
        self.inverse().is_some()
    }
}

///
/// Relationship
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Relationship {
    /// Target entity name.
    pub target: String,

    pub cardinality: Cardinality,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_reference: Option<String>,

    pub uses_list: bool,

    /// Mapping table name for many-to-many.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_table: Option<String>,
}

impl Relationship {
    #[must_use]
    pub fn new(target: impl Into<String>, cardinality: Cardinality, uses_list: bool) -> Self {
        Self {
            target: target.into(),
            cardinality,
            back_reference: None,
            uses_list,
            join_table: None,
        }
    }

    #[must_use]
    pub fn with_back_reference(mut self, back_reference: impl Into<String>) -> Self {
        self.back_reference = Some(back_reference.into());
        self
    }

    #[must_use]
    pub fn with_join_table(mut self, join_table: impl Into<String>) -> Self {
        self.join_table = Some(join_table.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evidence_table() {
        use Multiplicity::{Many, One};

        assert_eq!(Cardinality::from_evidence(One, Some(One)), Cardinality::OneToOne);
        assert_eq!(Cardinality::from_evidence(One, Some(Many)), Cardinality::ManyToOne);
        assert_eq!(Cardinality::from_evidence(Many, Some(One)), Cardinality::OneToMany);
        assert_eq!(Cardinality::from_evidence(Many, Some(Many)), Cardinality::ManyToMany);
        assert_eq!(Cardinality::from_evidence(One, None), Cardinality::ToOne);
        assert_eq!(Cardinality::from_evidence(Many, None), Cardinality::ToMany);
    }

    #[test]
    fn inverse_is_an_involution_on_reciprocal_kinds() {
        for c in [
            Cardinality::OneToOne,
            Cardinality::OneToMany,
            Cardinality::ManyToOne,
            Cardinality::ManyToMany,
        ] {
            let back = c.inverse().expect("reciprocal");
            assert_eq!(back.inverse(), Some(c));
        }
        assert!(!Cardinality::ToMany.is_reciprocal());
    }

    #[test]
    fn serializes_screaming_snake() {
        let json = serde_json::to_string(&Cardinality::ManyToOne).unwrap();

        assert_eq!(json, "\"MANY_TO_ONE\"");
        assert_eq!(Cardinality::ToMany.to_string(), "TO_MANY");
    }
}
