//! Naming helpers shared by the schema and core crates.

pub mod case;
pub mod plural;

pub use case::{column_ident, flat};
pub use plural::pluralize;
